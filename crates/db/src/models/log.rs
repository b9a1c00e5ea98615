//! Activity log record model and DTOs.

use mongodb::bson::{doc, Bson, Document};
use poopyrus_core::patch::Patch;
use poopyrus_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::document::{to_bson_datetime, DocumentReader};
use crate::store::StoreError;

/// Collection holding activity log documents.
pub const LOG_COLLECTION: &str = "logs";

/// An activity log decoded from the `logs` collection.
///
/// `date` is when the activity happened, as supplied by the caller; it is
/// independent of the `created_at`/`updated_at` bookkeeping stamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Log {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub log_type: String,
    pub date: Timestamp,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Log {
    pub fn from_document(doc: &Document) -> Result<Self, StoreError> {
        let r = DocumentReader::new(LOG_COLLECTION, doc);
        Ok(Self {
            id: r.id()?,
            user_id: r.required_str("user_id")?,
            name: r.required_str("name")?,
            log_type: r.required_str("type")?,
            date: r.required_datetime("date")?,
            note: r.optional_str("note")?,
            created_at: r.required_datetime("created_at")?,
            updated_at: r.optional_datetime("updated_at")?,
        })
    }
}

/// DTO for creating a log entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLog {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type must not be empty"))]
    pub log_type: String,
    pub date: Timestamp,
    #[serde(default)]
    pub note: Option<String>,
}

impl CreateLog {
    pub fn to_document(&self, owner: &str, now: Timestamp) -> Document {
        doc! {
            "user_id": owner,
            "name": self.name.as_str(),
            "type": self.log_type.as_str(),
            "date": to_bson_datetime(self.date),
            "note": self.note.as_deref().map_or(Bson::Null, Bson::from),
            "created_at": to_bson_datetime(now),
            "updated_at": Bson::Null,
        }
    }
}

/// DTO for partially updating a log entry.
///
/// `note` is nullable: `{"note": null}` clears it, omitting it keeps it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLog {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default, rename = "type")]
    pub log_type: Patch<String>,
    #[serde(default)]
    pub date: Patch<Timestamp>,
    #[serde(default)]
    pub note: Patch<Option<String>>,
}

impl UpdateLog {
    pub fn is_empty(&self) -> bool {
        !(self.name.is_present()
            || self.log_type.is_present()
            || self.date.is_present()
            || self.note.is_present())
    }

    pub fn to_set(&self) -> Document {
        let mut set = Document::new();
        if let Patch::Value(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Patch::Value(log_type) = &self.log_type {
            set.insert("type", log_type.as_str());
        }
        if let Patch::Value(date) = &self.date {
            set.insert("date", to_bson_datetime(*date));
        }
        if let Patch::Value(note) = &self.note {
            set.insert("note", note.as_deref().map_or(Bson::Null, Bson::from));
        }
        set
    }
}
