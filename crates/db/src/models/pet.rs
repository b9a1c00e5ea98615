//! Pet record model and DTOs.

use mongodb::bson::{doc, Bson, Document};
use poopyrus_core::patch::Patch;
use poopyrus_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::document::{to_bson_datetime, DocumentReader};
use crate::store::StoreError;

/// Collection holding pet documents.
pub const PET_COLLECTION: &str = "pets";

/// A pet document decoded from the `pets` collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pet {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Pet {
    pub fn from_document(doc: &Document) -> Result<Self, StoreError> {
        let r = DocumentReader::new(PET_COLLECTION, doc);
        Ok(Self {
            id: r.id()?,
            user_id: r.required_str("user_id")?,
            name: r.required_str("name")?,
            pet_type: r.required_str("type")?,
            created_at: r.required_datetime("created_at")?,
            updated_at: r.optional_datetime("updated_at")?,
        })
    }
}

/// DTO for creating a pet.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePet {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type must not be empty"))]
    pub pet_type: String,
}

impl CreatePet {
    /// Document to insert: payload fields plus owner and creation stamp.
    pub fn to_document(&self, owner: &str, now: Timestamp) -> Document {
        doc! {
            "user_id": owner,
            "name": self.name.as_str(),
            "type": self.pet_type.as_str(),
            "created_at": to_bson_datetime(now),
            "updated_at": Bson::Null,
        }
    }
}

/// DTO for partially updating a pet. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePet {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default, rename = "type")]
    pub pet_type: Patch<String>,
}

impl UpdatePet {
    pub fn is_empty(&self) -> bool {
        !self.name.is_present() && !self.pet_type.is_present()
    }

    /// The `$set` fields for the supplied values only.
    pub fn to_set(&self) -> Document {
        let mut set = Document::new();
        if let Patch::Value(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Patch::Value(pet_type) = &self.pet_type {
            set.insert("type", pet_type.as_str());
        }
        set
    }
}
