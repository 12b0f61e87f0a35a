//! Timestamp wire format: UTC with exactly three fractional digits (`2011-03-11T05:46:24.000Z`),
//! so stored strings sort chronologically.

use chrono::{DateTime, NaiveDate, Utc};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub fn format(d: &DateTime<Utc>) -> String {
    d.format(FORMAT).to_string()
}

/// Parse RFC 3339, or a bare `YYYY-MM-DD` as midnight UTC.
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(d) = DateTime::parse_from_rfc3339(s.trim()) {
        return Some(d.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// serde `with` module for `Option<DateTime<Utc>>` fields. Use together with `#[serde(default)]`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_str(&super::format(d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => super::parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date-time '{}'", s))),
        }
    }
}
