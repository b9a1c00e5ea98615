//! Persistence layer: the document store adapter, typed record models and
//! the per-resource CRUD contract built on top of them.

pub mod models;
pub mod repositories;
pub mod store;

use std::sync::Arc;

pub use store::memory::MemoryStore;
pub use store::mongo::MongoStore;
pub use store::{DocumentStore, SharedStore, StoreError, UpdateOutcome};

/// Connect to MongoDB and return a shareable store handle.
pub async fn connect(uri: &str, database: &str) -> Result<SharedStore, StoreError> {
    let store = MongoStore::connect(uri, database).await?;
    Ok(Arc::new(store))
}

/// Verify that the store is reachable.
pub async fn health_check(store: &dyn DocumentStore) -> Result<(), StoreError> {
    store.ping().await
}
