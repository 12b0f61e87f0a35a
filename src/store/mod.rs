//! Document persistence behind a backend-agnostic trait.
//!
//! Documents are JSON objects. Stores return them with `id` set; writes take them without.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::query::{Filter, Predicate};
use async_trait::async_trait;
use serde_json::{Map, Value};

pub type Document = Map<String, Value>;

/// Fresh store-assigned identifier (32 lowercase hex characters).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create the backing collection if it does not exist.
    async fn ensure_collection(&self, collection: &str) -> Result<(), AppError>;

    /// Store `doc` under `id`. A taken id is a conflict.
    async fn insert(&self, collection: &str, id: &str, doc: Document) -> Result<(), AppError>;

    /// Matching documents in filter order, paged. Projection is left to the caller.
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, AppError>;

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError>;

    async fn count(&self, collection: &str, predicate: Option<&Predicate>) -> Result<u64, AppError>;

    /// Merge `patch` into every matching document. Returns how many matched.
    async fn update_all(
        &self,
        collection: &str,
        patch: Document,
        predicate: Option<&Predicate>,
    ) -> Result<u64, AppError>;

    /// Merge `patch` into one document. `false` when the id is unknown.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<bool, AppError>;

    /// Overwrite one document. `false` when the id is unknown.
    async fn replace_by_id(
        &self,
        collection: &str,
        id: &str,
        doc: Document,
    ) -> Result<bool, AppError>;

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, AppError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Attach `id` to a stored document body.
pub(crate) fn with_id(id: &str, mut doc: Document) -> Document {
    doc.insert(crate::schema::ID_FIELD.to_string(), Value::String(id.to_string()));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_hex_and_unique() {
        let a = new_id();
        let b = new_id();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, b);
    }
}
