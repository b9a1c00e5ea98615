//! Generic CRUD contract shared by every owner-scoped resource.
//!
//! The rules, identical for pets and logs:
//!
//! - ids are parsed before the store is touched; unparsable ids are
//!   [`CoreError::InvalidIdentifier`];
//! - list and get are not owner-filtered;
//! - update and delete filter on id *and* owner, so a record owned by
//!   someone else is indistinguishable from a missing one
//!   ([`CoreError::NotFound`]);
//! - update only writes supplied fields and stamps `updated_at` whenever it
//!   writes anything; an update with no supplied fields is
//!   [`CoreError::NoChangeApplied`].

use std::marker::PhantomData;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use poopyrus_core::error::CoreError;
use poopyrus_core::types::Timestamp;

use crate::models::document::to_bson_datetime;
use crate::store::{DocumentStore, StoreError};

/// Failure from a repository call: either a contract violation the caller
/// can act on, or a store failure.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Describes how one resource type maps onto a store collection.
pub trait Resource {
    /// Store collection name.
    const COLLECTION: &'static str;
    /// Human label used in error messages (`"Pet"`, `"Log"`).
    const ENTITY: &'static str;

    type Record: Send;
    type Create: Sync;
    type Update: Sync;

    fn validate_create(input: &Self::Create) -> Result<(), CoreError>;
    fn validate_update(input: &Self::Update) -> Result<(), CoreError>;

    /// Document to insert, stamped with owner and creation time.
    fn creation_document(input: &Self::Create, owner: &str, now: Timestamp) -> Document;

    /// Whether the update payload supplies no fields at all.
    fn is_empty_update(input: &Self::Update) -> bool;

    /// `$set` fields for the values present in the update payload.
    fn update_fields(input: &Self::Update) -> Document;

    fn decode(doc: &Document) -> Result<Self::Record, StoreError>;
}

/// CRUD operations for any [`Resource`].
pub struct ResourceRepo<R>(PhantomData<R>);

impl<R: Resource> ResourceRepo<R> {
    /// Parse a caller-supplied id into the store's native id.
    pub fn parse_id(id: &str) -> Result<ObjectId, CoreError> {
        ObjectId::parse_str(id).map_err(|_| CoreError::InvalidIdentifier { entity: R::ENTITY })
    }

    fn not_found(id: &str) -> RepoError {
        RepoError::Core(CoreError::NotFound {
            entity: R::ENTITY,
            id: id.to_string(),
        })
    }

    /// All records in the collection, across every owner, in store order.
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<R::Record>, RepoError> {
        let docs = store.find_all(R::COLLECTION).await?;
        let records = docs
            .iter()
            .map(R::decode)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> Result<R::Record, RepoError> {
        let oid = Self::parse_id(id)?;
        let doc = store
            .find_by_id(R::COLLECTION, oid)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        Ok(R::decode(&doc)?)
    }

    /// Insert a new record owned by `owner`; returns its id. No duplicate check.
    pub async fn create(
        store: &dyn DocumentStore,
        owner: &str,
        input: &R::Create,
    ) -> Result<String, RepoError> {
        R::validate_create(input)?;
        let doc = R::creation_document(input, owner, Utc::now());
        let id = store.insert(R::COLLECTION, doc).await?;
        Ok(id.to_hex())
    }

    /// Apply a partial update to a record owned by `owner`.
    ///
    /// An empty payload on an existing, owned record is
    /// [`CoreError::NoChangeApplied`]. A non-empty payload always succeeds
    /// on a matched record, even when the stored values are unchanged.
    pub async fn update(
        store: &dyn DocumentStore,
        owner: &str,
        id: &str,
        input: &R::Update,
    ) -> Result<(), RepoError> {
        let oid = Self::parse_id(id)?;
        R::validate_update(input)?;

        if R::is_empty_update(input) {
            // An empty `$set` writes nothing and only reports the match.
            let outcome = store
                .update_owned(R::COLLECTION, oid, owner, Document::new())
                .await?;
            if outcome.matched == 0 {
                return Err(Self::not_found(id));
            }
            return Err(RepoError::Core(CoreError::NoChangeApplied));
        }

        let mut set = R::update_fields(input);
        set.insert("updated_at", to_bson_datetime(Utc::now()));

        let outcome = store.update_owned(R::COLLECTION, oid, owner, set).await?;
        if outcome.matched == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    /// Physically delete a record owned by `owner`.
    pub async fn delete(store: &dyn DocumentStore, owner: &str, id: &str) -> Result<(), RepoError> {
        let oid = Self::parse_id(id)?;
        let deleted = store.delete_owned(R::COLLECTION, oid, owner).await?;
        if deleted == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
