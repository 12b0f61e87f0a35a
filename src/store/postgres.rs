//! PostgreSQL store: one JSONB table per collection inside a dedicated schema.

use super::{with_id, Document, DocumentStore};
use crate::error::AppError;
use crate::query::{Filter, Predicate};
use crate::settings::Settings;
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
        }
    }

    /// Create the database if missing, open a pool and create the collection schema.
    pub async fn connect(settings: &Settings) -> Result<Self, AppError> {
        ensure_database_exists(&settings.database_url).await?;
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.database_url)
            .await?;
        let store = PgStore::new(pool, settings.db_schema.clone());
        sqlx::query(&sql::create_schema(&store.schema))
            .execute(&store.pool)
            .await?;
        Ok(store)
    }

    async fn fetch_documents(&self, q: &QueryBuf) -> Result<Vec<Document>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, (String, Value)>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(id, doc)| row_to_document(&id, doc)).collect())
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.execute(&self.pool).await?.rows_affected())
    }
}

fn row_to_document(id: &str, doc: Value) -> Document {
    let body = match doc {
        Value::Object(map) => map,
        _ => Document::new(),
    };
    with_id(id, body)
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), AppError> {
        let ddl = sql::create_collection(&self.schema, collection);
        tracing::debug!(sql = %ddl, "ensure collection");
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, collection: &str, id: &str, doc: Document) -> Result<(), AppError> {
        let q = sql::insert(&self.schema, collection, id, Value::Object(doc));
        self.execute(&q).await?;
        Ok(())
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, AppError> {
        let q = sql::select_list(&self.schema, collection, filter);
        self.fetch_documents(&q).await
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        let q = sql::select_by_id(&self.schema, collection, id);
        Ok(self.fetch_documents(&q).await?.into_iter().next())
    }

    async fn count(
        &self,
        collection: &str,
        predicate: Option<&Predicate>,
    ) -> Result<u64, AppError> {
        let q = sql::count(&self.schema, collection, predicate);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<_, i64>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let n = query.fetch_one(&self.pool).await?;
        Ok(n.max(0) as u64)
    }

    async fn update_all(
        &self,
        collection: &str,
        patch: Document,
        predicate: Option<&Predicate>,
    ) -> Result<u64, AppError> {
        let q = sql::update_where(&self.schema, collection, Value::Object(patch), predicate);
        self.execute(&q).await
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<bool, AppError> {
        let q = sql::update_by_id(&self.schema, collection, id, Value::Object(patch));
        Ok(self.execute(&q).await? > 0)
    }

    async fn replace_by_id(
        &self,
        collection: &str,
        id: &str,
        doc: Document,
    ) -> Result<bool, AppError> {
        let q = sql::replace_by_id(&self.schema, collection, id, Value::Object(doc));
        Ok(self.execute(&q).await? > 0)
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        let q = sql::delete_by_id(&self.schema, collection, id);
        Ok(self.execute(&q).await? > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = split_database_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into the maintenance-database URL and the target database name.
fn split_database_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
