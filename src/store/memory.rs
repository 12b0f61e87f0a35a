//! In-process store. Same query semantics as PostgreSQL; state is lost on drop.

use super::{with_id, Document, DocumentStore};
use crate::error::AppError;
use crate::query::eval::{compare_documents, Matcher};
use crate::query::{Filter, Predicate};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collection {
    /// Insertion order; `sort_by` is stable so ties keep it.
    rows: Vec<(String, Document)>,
}

impl Collection {
    fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|(row_id, _)| row_id == id)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matcher(predicate: Option<&Predicate>) -> Result<Option<Matcher<'_>>, AppError> {
    predicate.map(Matcher::new).transpose()
}

fn selected(matcher: Option<&Matcher<'_>>, doc: &Document) -> bool {
    matcher.map(|m| m.matches(doc)).unwrap_or(true)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), AppError> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default();
        Ok(())
    }

    async fn insert(&self, collection: &str, id: &str, doc: Document) -> Result<(), AppError> {
        let mut guard = self.collections.write().await;
        let coll = guard.entry(collection.to_string()).or_default();
        if coll.position(id).is_some() {
            return Err(AppError::Conflict(format!(
                "id \"{}\" already exists in {}",
                id, collection
            )));
        }
        coll.rows.push((id.to_string(), with_id(id, doc)));
        Ok(())
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, AppError> {
        let matcher = matcher(filter.predicate.as_ref())?;
        let guard = self.collections.read().await;
        let Some(coll) = guard.get(collection) else {
            return Ok(Vec::new());
        };
        let mut docs: Vec<&Document> = coll
            .rows
            .iter()
            .map(|(_, doc)| doc)
            .filter(|doc| selected(matcher.as_ref(), doc))
            .collect();
        if !filter.order.is_empty() {
            docs.sort_by(|a, b| compare_documents(&filter.order, a, b));
        }
        let skip = filter.skip.unwrap_or(0) as usize;
        let take = filter.limit.map(|n| n as usize).unwrap_or(usize::MAX);
        Ok(docs.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|coll| coll.position(id).map(|i| coll.rows[i].1.clone())))
    }

    async fn count(
        &self,
        collection: &str,
        predicate: Option<&Predicate>,
    ) -> Result<u64, AppError> {
        let matcher = matcher(predicate)?;
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|coll| {
                coll.rows
                    .iter()
                    .filter(|(_, doc)| selected(matcher.as_ref(), doc))
                    .count() as u64
            })
            .unwrap_or(0))
    }

    async fn update_all(
        &self,
        collection: &str,
        patch: Document,
        predicate: Option<&Predicate>,
    ) -> Result<u64, AppError> {
        let matcher = matcher(predicate)?;
        let mut guard = self.collections.write().await;
        let Some(coll) = guard.get_mut(collection) else {
            return Ok(0);
        };
        let mut n = 0;
        for (_, doc) in coll
            .rows
            .iter_mut()
            .filter(|(_, doc)| selected(matcher.as_ref(), doc))
        {
            doc.extend(patch.clone());
            n += 1;
        }
        Ok(n)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<bool, AppError> {
        let mut guard = self.collections.write().await;
        let Some(coll) = guard.get_mut(collection) else {
            return Ok(false);
        };
        match coll.position(id) {
            Some(i) => {
                coll.rows[i].1.extend(patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace_by_id(
        &self,
        collection: &str,
        id: &str,
        doc: Document,
    ) -> Result<bool, AppError> {
        let mut guard = self.collections.write().await;
        let Some(coll) = guard.get_mut(collection) else {
            return Ok(false);
        };
        match coll.position(id) {
            Some(i) => {
                coll.rows[i].1 = with_id(id, doc);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        let mut guard = self.collections.write().await;
        let Some(coll) = guard.get_mut(collection) else {
            return Ok(false);
        };
        match coll.position(id) {
            Some(i) => {
                coll.rows.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quake;
    use crate::schema::Record;
    use serde_json::{json, Value};

    fn doc(v: Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert("quake", "a", doc(json!({"name": "A", "mw": 7.0}))).await.unwrap();
        store.insert("quake", "b", doc(json!({"name": "B", "mw": 9.1}))).await.unwrap();
        store.insert("quake", "c", doc(json!({"name": "C"}))).await.unwrap();
        store
    }

    fn filter(v: Value) -> Filter {
        Filter::parse(&v, Quake::schema()).unwrap()
    }

    #[tokio::test]
    async fn duplicate_id_conflicts() {
        let store = seeded().await;
        let err = store.insert("quake", "a", Document::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_orders_pages_and_keeps_insertion_ties() {
        let store = seeded().await;
        let all = store.find("quake", &Filter::default()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        let desc = store.find("quake", &filter(json!({"order": "mw DESC"}))).await.unwrap();
        let ids: Vec<_> = desc.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["c", "b", "a"]);

        let page = store
            .find("quake", &filter(json!({"order": "mw ASC", "skip": 1, "limit": 1})))
            .await
            .unwrap();
        assert_eq!(page[0]["id"], "b");
    }

    #[tokio::test]
    async fn update_all_merges_and_counts() {
        let store = seeded().await;
        let p = Predicate::parse(&json!({"mw": {"gt": 7}}), Quake::schema()).unwrap();
        let n = store
            .update_all("quake", doc(json!({"noaaTsunami": true})), Some(&p))
            .await
            .unwrap();
        assert_eq!(n, 1);
        let b = store.find_by_id("quake", "b").await.unwrap().unwrap();
        assert_eq!(b["noaaTsunami"], true);
        assert_eq!(b["name"], "B");
    }

    #[tokio::test]
    async fn replace_drops_unlisted_fields() {
        let store = seeded().await;
        assert!(store.replace_by_id("quake", "a", doc(json!({"name": "A2"}))).await.unwrap());
        let a = store.find_by_id("quake", "a").await.unwrap().unwrap();
        assert_eq!(Value::Object(a), json!({"id": "a", "name": "A2"}));
        assert!(!store.replace_by_id("quake", "zz", Document::new()).await.unwrap());
    }

    #[tokio::test]
    async fn count_and_update_all_share_one_compiled_pattern() {
        let store = seeded().await;
        let p = Predicate::parse(&json!({"name": {"regexp": "^[AB]$"}}), Quake::schema()).unwrap();
        assert_eq!(store.count("quake", Some(&p)).await.unwrap(), 2);
        let n = store
            .update_all("quake", doc(json!({"noaaTsunami": false})), Some(&p))
            .await
            .unwrap();
        assert_eq!(n, 2);
        let like_filter = filter(json!({"where": {"name": {"like": "_"}}}));
        let found = store.find("quake", &like_filter);
        assert_eq!(found.await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn delete_and_count() {
        let store = seeded().await;
        assert!(store.delete_by_id("quake", "b").await.unwrap());
        assert!(!store.delete_by_id("quake", "b").await.unwrap());
        assert_eq!(store.count("quake", None).await.unwrap(), 2);
        assert_eq!(store.count("tsunamiRunup", None).await.unwrap(), 0);
    }
}
