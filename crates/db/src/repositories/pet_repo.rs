//! Repository for the `pets` collection.

use mongodb::bson::Document;
use poopyrus_core::error::CoreError;
use poopyrus_core::types::Timestamp;
use poopyrus_core::validation::{validate_patch_text, validate_payload};

use super::resource::{Resource, ResourceRepo};
use crate::models::pet::{CreatePet, Pet, UpdatePet, PET_COLLECTION};
use crate::store::StoreError;

pub struct PetResource;

impl Resource for PetResource {
    const COLLECTION: &'static str = PET_COLLECTION;
    const ENTITY: &'static str = "Pet";

    type Record = Pet;
    type Create = CreatePet;
    type Update = UpdatePet;

    fn validate_create(input: &CreatePet) -> Result<(), CoreError> {
        validate_payload(input)
    }

    fn validate_update(input: &UpdatePet) -> Result<(), CoreError> {
        validate_patch_text("name", &input.name)?;
        validate_patch_text("type", &input.pet_type)
    }

    fn creation_document(input: &CreatePet, owner: &str, now: Timestamp) -> Document {
        input.to_document(owner, now)
    }

    fn is_empty_update(input: &UpdatePet) -> bool {
        input.is_empty()
    }

    fn update_fields(input: &UpdatePet) -> Document {
        input.to_set()
    }

    fn decode(doc: &Document) -> Result<Pet, StoreError> {
        Pet::from_document(doc)
    }
}

/// CRUD for pets.
pub type PetRepo = ResourceRepo<PetResource>;
