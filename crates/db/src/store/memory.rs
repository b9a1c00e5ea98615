//! In-process [`DocumentStore`] used by tests and `STORE_BACKEND=memory` runs.
//!
//! Collections keep insertion order, which is their iteration order. Update
//! counts follow MongoDB: a `$set` that writes identical values matches but
//! does not modify.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError, UpdateOutcome};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn has_id(document: &Document, id: &ObjectId) -> bool {
    document.get_object_id("_id").is_ok_and(|v| v == *id)
}

fn is_owned(document: &Document, id: &ObjectId, owner: &str) -> bool {
    has_id(document, id) && document.get_str("user_id").is_ok_and(|v| v == owner)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| has_id(d, &id)))
            .cloned())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        let mut stored = Document::new();
        stored.insert("_id", id);
        for (key, value) in document {
            stored.insert(key, value);
        }

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(stored);
        Ok(id)
    }

    async fn update_owned(
        &self,
        collection: &str,
        id: ObjectId,
        owner: &str,
        set: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(target) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| is_owned(d, &id, owner)))
        else {
            return Ok(UpdateOutcome::default());
        };

        let mut changed = false;
        for (key, value) in set {
            if target.get(&key) != Some(&value) {
                changed = true;
                target.insert(key, value);
            }
        }

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn delete_owned(
        &self,
        collection: &str,
        id: ObjectId,
        owner: &str,
    ) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|d| is_owned(d, &id, owner)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;

    use super::*;

    #[tokio::test]
    async fn insert_assigns_id_and_preserves_order() {
        let store = MemoryStore::new();
        let first = store.insert("pets", doc! { "name": "a" }).await.unwrap();
        let second = store.insert("pets", doc! { "name": "b" }).await.unwrap();
        assert_ne!(first, second);

        let all = store.find_all("pets").await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].get_object_id("_id").unwrap(), first);
        assert_eq!(all[1].get_str("name").unwrap(), "b");
    }

    #[tokio::test]
    async fn update_requires_matching_owner() {
        let store = MemoryStore::new();
        let id = store
            .insert("pets", doc! { "user_id": "alice", "name": "Rex" })
            .await
            .unwrap();

        let outcome = store
            .update_owned("pets", id, "bob", doc! { "name": "Stolen" })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::default());

        let outcome = store
            .update_owned("pets", id, "alice", doc! { "name": "Max" })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 1 });

        let stored = store.find_by_id("pets", id).await.unwrap().unwrap();
        assert_eq!(stored.get_str("name").unwrap(), "Max");
    }

    #[tokio::test]
    async fn identical_set_matches_without_modifying() {
        let store = MemoryStore::new();
        let id = store
            .insert("pets", doc! { "user_id": "alice", "name": "Rex" })
            .await
            .unwrap();

        let outcome = store
            .update_owned("pets", id, "alice", doc! { "name": "Rex" })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 0 });

        let outcome = store
            .update_owned("pets", id, "alice", Document::new())
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 0 });
    }

    #[tokio::test]
    async fn delete_is_owner_scoped() {
        let store = MemoryStore::new();
        let id = store
            .insert("logs", doc! { "user_id": "alice" })
            .await
            .unwrap();

        assert_eq!(store.delete_owned("logs", id, "bob").await.unwrap(), 0);
        assert_eq!(store.count("logs").await, 1);
        assert_eq!(store.delete_owned("logs", id, "alice").await.unwrap(), 1);
        assert_eq!(store.delete_owned("logs", id, "alice").await.unwrap(), 0);
        assert_eq!(store.count("logs").await, 0);
    }

    #[tokio::test]
    async fn unknown_collection_is_empty() {
        let store = MemoryStore::new();
        assert!(store.find_all("nothing").await.unwrap().is_empty());
        assert!(store
            .find_by_id("nothing", ObjectId::new())
            .await
            .unwrap()
            .is_none());
    }
}
