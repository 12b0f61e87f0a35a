//! Generic CRUD over a [`DocumentStore`], typed by the record kind.

use crate::error::AppError;
use crate::query::{Filter, Predicate, Projection};
use crate::schema::{Record, ID_FIELD};
use crate::service::RecordValidator;
use crate::store::{new_id, Document, DocumentStore};
use std::marker::PhantomData;
use std::sync::Arc;

pub struct CrudRepository<E: Record> {
    store: Arc<dyn DocumentStore>,
    _record: PhantomData<fn() -> E>,
}

impl<E: Record> Clone for CrudRepository<E> {
    fn clone(&self) -> Self {
        CrudRepository {
            store: Arc::clone(&self.store),
            _record: PhantomData,
        }
    }
}

impl<E: Record> CrudRepository<E> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        CrudRepository {
            store,
            _record: PhantomData,
        }
    }

    fn collection(&self) -> &'static str {
        E::schema().collection
    }

    fn not_found(id: &str) -> AppError {
        AppError::record_not_found(E::schema().name, id)
    }

    /// Validate and store a new record body. Returns the stored document with its assigned `id`.
    pub async fn create_document(&self, body: &Document) -> Result<Document, AppError> {
        let doc = RecordValidator::validate(body, E::schema())?;
        let id = new_id();
        tracing::debug!(collection = self.collection(), id = %id, "create");
        self.store.insert(self.collection(), &id, doc.clone()).await?;
        let mut stored = doc;
        stored.insert(ID_FIELD.to_string(), id.into());
        Ok(stored)
    }

    /// Store a typed record. Any `id` it carries is replaced by a fresh one.
    pub async fn create(&self, record: &E) -> Result<E, AppError> {
        let doc = self.create_document(&record.to_document()?).await?;
        E::from_document(doc)
    }

    /// Matching documents with the filter's projection applied.
    pub async fn find_documents(&self, filter: &Filter) -> Result<Vec<Document>, AppError> {
        let mut docs = self.store.find(self.collection(), filter).await?;
        if let Some(projection) = &filter.fields {
            docs.iter_mut().for_each(|doc| projection.apply(doc));
        }
        Ok(docs)
    }

    /// Matching records. Projection is ignored so every record decodes.
    pub async fn find(&self, filter: &Filter) -> Result<Vec<E>, AppError> {
        self.store
            .find(self.collection(), filter)
            .await?
            .into_iter()
            .map(E::from_document)
            .collect()
    }

    pub async fn find_document_by_id(
        &self,
        id: &str,
        projection: Option<&Projection>,
    ) -> Result<Document, AppError> {
        let mut doc = self
            .store
            .find_by_id(self.collection(), id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        if let Some(projection) = projection {
            projection.apply(&mut doc);
        }
        Ok(doc)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<E, AppError> {
        E::from_document(self.find_document_by_id(id, None).await?)
    }

    pub async fn count(&self, predicate: Option<&Predicate>) -> Result<u64, AppError> {
        self.store.count(self.collection(), predicate).await
    }

    /// Merge `patch` into every record matching `predicate` (all when `None`). Returns the
    /// number updated. An `id` in the patch is a validation error.
    pub async fn update_all(
        &self,
        patch: &Document,
        predicate: Option<&Predicate>,
    ) -> Result<u64, AppError> {
        let patch = RecordValidator::validate_partial(patch, E::schema())?;
        let n = self.store.update_all(self.collection(), patch, predicate).await?;
        tracing::debug!(collection = self.collection(), updated = n, "update all");
        Ok(n)
    }

    /// Merge `patch` into one record; fields not in the patch are kept.
    pub async fn update_by_id(&self, id: &str, patch: &Document) -> Result<(), AppError> {
        let patch = RecordValidator::validate_partial(&without_id(patch), E::schema())?;
        if self.store.update_by_id(self.collection(), id, patch).await? {
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }

    /// Replace one record wholesale; fields not in `body` are cleared.
    pub async fn replace_by_id(&self, id: &str, body: &Document) -> Result<(), AppError> {
        let doc = RecordValidator::validate(&without_id(body), E::schema())?;
        if self.store.replace_by_id(self.collection(), id, doc).await? {
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        if self.store.delete_by_id(self.collection(), id).await? {
            tracing::debug!(collection = self.collection(), id = %id, "deleted");
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }
}

/// Body with any `id` dropped, for operations addressed by id; the addressed identity wins.
fn without_id(body: &Document) -> Document {
    let mut body = body.clone();
    body.remove(ID_FIELD);
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quake, TsunamiRunup};
    use crate::store::MemoryStore;
    use serde_json::json;

    fn repo<E: Record>() -> CrudRepository<E> {
        CrudRepository::new(Arc::new(MemoryStore::new()))
    }

    fn body(v: serde_json::Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn create_assigns_id_and_round_trips() {
        let repo = repo::<Quake>();
        let mut quake = Quake::new("Tohoku");
        quake.mw = Some(9.1);
        let created = repo.create(&quake).await.unwrap();
        let id = created.id().unwrap().to_string();
        assert_eq!(id.len(), 32);
        let fetched = repo.find_by_id(&id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.mw, Some(9.1));
    }

    #[tokio::test]
    async fn create_rejects_missing_required_and_client_ids() {
        let repo = repo::<TsunamiRunup>();
        assert!(matches!(
            repo.create_document(&body(json!({"country": "JAPAN"}))).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            repo.create_document(&body(json!({"infoSource": "NGDC", "id": "x"}))).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn absent_ids_are_not_found() {
        let repo = repo::<Quake>();
        let patch = body(json!({"mw": 5}));
        assert!(matches!(repo.find_by_id("nope").await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.update_by_id("nope", &patch).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            repo.replace_by_id("nope", &body(json!({"name": "x"}))).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(repo.delete_by_id("nope").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_merges_and_replace_clears() {
        let repo = repo::<Quake>();
        let doc = repo
            .create_document(&body(json!({"name": "Chile", "mw": 8.8, "noaaTsunami": true})))
            .await
            .unwrap();
        let id = doc["id"].as_str().unwrap().to_string();

        repo.update_by_id(&id, &body(json!({"mw": 8.9, "id": "ignored"}))).await.unwrap();
        let merged = repo.find_by_id(&id).await.unwrap();
        assert_eq!(merged.mw, Some(8.9));
        assert_eq!(merged.noaa_tsunami, Some(true));
        assert_eq!(merged.id(), Some(id.as_str()));

        repo.replace_by_id(&id, &body(json!({"name": "Maule"}))).await.unwrap();
        let replaced = repo.find_by_id(&id).await.unwrap();
        assert_eq!(replaced.name, "Maule");
        assert_eq!(replaced.mw, None);
        assert_eq!(replaced.noaa_tsunami, None);
    }

    #[tokio::test]
    async fn count_matches_find_and_update_all() {
        let repo = repo::<Quake>();
        for (name, mw) in [("a", 6.5), ("b", 7.2), ("c", 8.0)] {
            repo.create_document(&body(json!({"name": name, "mw": mw}))).await.unwrap();
        }
        let all = repo.find(&Filter::default()).await.unwrap();
        assert_eq!(repo.count(None).await.unwrap(), all.len() as u64);

        let strong = Predicate::parse(&json!({"mw": {"gt": 7}}), Quake::schema()).unwrap();
        let n = repo.update_all(&body(json!({"noaaTsunami": true})), Some(&strong)).await.unwrap();
        assert_eq!(n, 2);
        let flagged = Predicate::parse(&json!({"noaaTsunami": true}), Quake::schema()).unwrap();
        assert_eq!(repo.count(Some(&flagged)).await.unwrap(), 2);
        assert!(repo.update_all(&body(json!({"id": "x"})), None).await.is_err());
    }

    #[tokio::test]
    async fn projection_applies_to_documents() {
        let repo = repo::<Quake>();
        let doc = repo.create_document(&body(json!({"name": "x", "mw": 7.0}))).await.unwrap();
        let id = doc["id"].as_str().unwrap();
        let filter = Filter::parse(&json!({"fields": {"mw": true}}), Quake::schema()).unwrap();
        let docs = repo.find_documents(&filter).await.unwrap();
        assert_eq!(serde_json::Value::Object(docs[0].clone()), json!({"mw": 7.0}));
        let one = repo.find_document_by_id(id, filter.fields.as_ref()).await.unwrap();
        assert_eq!(one.len(), 1);
    }
}
