//! Typed records, request DTOs and document decoding.

pub mod document;
pub mod log;
pub mod pet;

use serde::Serialize;

/// Response for a successful create: the new record's id.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedId {
    pub id: String,
}

/// Response for a successful update or delete.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResult {
    pub success: bool,
}

impl SuccessResult {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
