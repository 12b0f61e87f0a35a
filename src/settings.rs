//! Process settings loaded from environment variables (after `.env`, if present).

use crate::error::ConfigError;
use std::str::FromStr;

/// Which document store backs the repositories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Memory,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Backend::Postgres),
            "memory" | "mem" => Ok(Backend::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    /// PostgreSQL schema holding one table per collection.
    pub db_schema: String,
    pub backend: Backend,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: "postgres://localhost/quakezone".into(),
            db_schema: "quakezone".into(),
            backend: Backend::Postgres,
            host: "0.0.0.0".into(),
            port: 3000,
            max_connections: 5,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// | Env Var              | Default                          |
    /// |----------------------|----------------------------------|
    /// | `DATABASE_URL`       | `postgres://localhost/quakezone` |
    /// | `QUAKEZONE_SCHEMA`   | `quakezone`                      |
    /// | `QUAKEZONE_BACKEND`  | `postgres`                       |
    /// | `HOST`               | `0.0.0.0`                        |
    /// | `PORT`               | `3000`                           |
    /// | `DB_MAX_CONNECTIONS` | `5`                              |
    /// | `BODY_LIMIT_BYTES`   | `1048576`                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let backend = match lookup("QUAKEZONE_BACKEND") {
            Some(v) => v.parse()?,
            None => defaults.backend,
        };
        Ok(Settings {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            db_schema: lookup("QUAKEZONE_SCHEMA").unwrap_or(defaults.db_schema),
            backend,
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            body_limit_bytes: parse_var(&lookup, "BODY_LIMIT_BYTES", defaults.body_limit_bytes)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let s = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(s.port, 3000);
        assert_eq!(s.backend, Backend::Postgres);
        assert_eq!(s.db_schema, "quakezone");
        assert_eq!(s.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_overrides() {
        let s = Settings::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("QUAKEZONE_BACKEND", "Memory"),
            ("DB_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();
        assert_eq!(s.port, 8080);
        assert_eq!(s.backend, Backend::Memory);
        assert_eq!(s.max_connections, 12);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Settings::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
        let err =
            Settings::from_lookup(lookup_from(&[("QUAKEZONE_BACKEND", "mongo")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBackend(_)));
    }
}
