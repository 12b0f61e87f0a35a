//! Values bound to PostgreSQL queries built by [`super::builder`].

use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// A bind parameter. JSON values travel as JSONB so they compare against `doc->'field'`.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Text(String),
    Json(Value),
}

impl SqlParam {
    pub fn text(s: impl Into<String>) -> Self {
        SqlParam::Text(s.into())
    }

    pub fn json(v: impl Into<Value>) -> Self {
        SqlParam::Json(v.into())
    }
}

impl<'q> Encode<'q, Postgres> for SqlParam {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            SqlParam::Text(s) => <&str as Encode<Postgres>>::encode_by_ref(&s.as_str(), buf),
            SqlParam::Json(v) => <Value as Encode<Postgres>>::encode_by_ref(v, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            SqlParam::Text(_) => PgTypeInfo::with_name("TEXT"),
            SqlParam::Json(_) => PgTypeInfo::with_name("JSONB"),
        })
    }
}

impl sqlx::Type<Postgres> for SqlParam {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        *ty == PgTypeInfo::with_name("TEXT") || *ty == PgTypeInfo::with_name("JSONB")
    }
}
