//! Document store adapter.
//!
//! A thin, collection-oriented interface: find-all, find-by-id, insert,
//! owner-scoped update and owner-scoped delete. Implementations must make the
//! filtered update and delete atomic per document; callers never do a
//! read-modify-write.

pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};

/// Shared store handle held in application state.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Failure talking to, or reading from, the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored document is missing a required field or has the wrong shape.
    #[error("Malformed {collection} document: {reason}")]
    Decode {
        collection: &'static str,
        reason: String,
    },
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Match and modification counts reported by a filtered update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in the collection, in store iteration order.
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert a document and return the store-generated `_id`.
    async fn insert(&self, collection: &str, document: Document) -> Result<ObjectId, StoreError>;

    /// `$set` the given fields on the document matching both `id` and `owner`.
    ///
    /// An empty `set` modifies nothing and only reports whether a document matched.
    async fn update_owned(
        &self,
        collection: &str,
        id: ObjectId,
        owner: &str,
        set: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Delete the document matching both `id` and `owner`; returns the deleted count.
    async fn delete_owned(
        &self,
        collection: &str,
        id: ObjectId,
        owner: &str,
    ) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Filter document selecting a record by id and owner.
pub fn owned_filter(id: ObjectId, owner: &str) -> Document {
    doc! { "_id": id, "user_id": owner }
}
