//! Repository for the `logs` collection.

use mongodb::bson::Document;
use poopyrus_core::error::CoreError;
use poopyrus_core::types::Timestamp;
use poopyrus_core::validation::{validate_patch_text, validate_payload};

use super::resource::{Resource, ResourceRepo};
use crate::models::log::{CreateLog, Log, UpdateLog, LOG_COLLECTION};
use crate::store::StoreError;

pub struct LogResource;

impl Resource for LogResource {
    const COLLECTION: &'static str = LOG_COLLECTION;
    const ENTITY: &'static str = "Log";

    type Record = Log;
    type Create = CreateLog;
    type Update = UpdateLog;

    fn validate_create(input: &CreateLog) -> Result<(), CoreError> {
        validate_payload(input)
    }

    fn validate_update(input: &UpdateLog) -> Result<(), CoreError> {
        validate_patch_text("name", &input.name)?;
        validate_patch_text("type", &input.log_type)
    }

    fn creation_document(input: &CreateLog, owner: &str, now: Timestamp) -> Document {
        input.to_document(owner, now)
    }

    fn is_empty_update(input: &UpdateLog) -> bool {
        input.is_empty()
    }

    fn update_fields(input: &UpdateLog) -> Document {
        input.to_set()
    }

    fn decode(doc: &Document) -> Result<Log, StoreError> {
        Log::from_document(doc)
    }
}

/// CRUD for activity logs.
pub type LogRepo = ResourceRepo<LogResource>;
