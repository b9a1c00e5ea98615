//! Strongly-typed field extraction from stored documents.
//!
//! Required fields fail with [`StoreError::Decode`] when missing or of the
//! wrong type. Optional fields accept both an absent key and `null`.

use mongodb::bson::{Bson, DateTime as BsonDateTime, Document};
use poopyrus_core::types::Timestamp;

use crate::store::StoreError;

/// Convert a UTC timestamp into the store's millisecond datetime.
pub fn to_bson_datetime(ts: Timestamp) -> BsonDateTime {
    BsonDateTime::from_millis(ts.timestamp_millis())
}

/// Convert a store datetime back into a UTC timestamp.
pub fn from_bson_datetime(dt: BsonDateTime) -> Option<Timestamp> {
    chrono::DateTime::from_timestamp_millis(dt.timestamp_millis())
}

/// Reads typed fields out of one document of a named collection.
pub struct DocumentReader<'a> {
    collection: &'static str,
    doc: &'a Document,
}

impl<'a> DocumentReader<'a> {
    pub fn new(collection: &'static str, doc: &'a Document) -> Self {
        Self { collection, doc }
    }

    fn error(&self, reason: String) -> StoreError {
        StoreError::Decode {
            collection: self.collection,
            reason,
        }
    }

    /// The `_id` field rendered as 24 lowercase hex characters.
    pub fn id(&self) -> Result<String, StoreError> {
        match self.doc.get("_id") {
            Some(Bson::ObjectId(oid)) => Ok(oid.to_hex()),
            Some(other) => Err(self.error(format!("_id has type {:?}", other.element_type()))),
            None => Err(self.error("missing _id".into())),
        }
    }

    pub fn required_str(&self, key: &str) -> Result<String, StoreError> {
        self.optional_str(key)?
            .ok_or_else(|| self.error(format!("missing required field `{key}`")))
    }

    pub fn optional_str(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.doc.get(key) {
            None | Some(Bson::Null) => Ok(None),
            Some(Bson::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.error(format!(
                "field `{key}` has type {:?}, expected string",
                other.element_type()
            ))),
        }
    }

    pub fn required_datetime(&self, key: &str) -> Result<Timestamp, StoreError> {
        self.optional_datetime(key)?
            .ok_or_else(|| self.error(format!("missing required field `{key}`")))
    }

    pub fn optional_datetime(&self, key: &str) -> Result<Option<Timestamp>, StoreError> {
        match self.doc.get(key) {
            None | Some(Bson::Null) => Ok(None),
            Some(Bson::DateTime(dt)) => from_bson_datetime(*dt)
                .map(Some)
                .ok_or_else(|| self.error(format!("field `{key}` is out of range"))),
            Some(other) => Err(self.error(format!(
                "field `{key}` has type {:?}, expected datetime",
                other.element_type()
            ))),
        }
    }
}
