//! Payload validation helpers.
//!
//! Create payloads derive [`validator::Validate`]; update payloads carry
//! [`Patch`] fields that are checked individually with [`validate_patch_text`].

use validator::Validate;

use crate::error::CoreError;
use crate::patch::Patch;

/// Run `validator` rules on a payload and fold failures into [`CoreError::Validation`].
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), CoreError> {
    payload
        .validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}

/// Reject empty strings for a required text field.
pub fn validate_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Apply [`validate_non_empty`] only when the field was supplied.
pub fn validate_patch_text(field: &str, value: &Patch<String>) -> Result<(), CoreError> {
    match value {
        Patch::Absent => Ok(()),
        Patch::Value(v) => validate_non_empty(field, v),
    }
}
