/// Domain-level failures produced by the resource contract and identity layers.
///
/// The HTTP layer maps each variant onto a fixed status code; messages are
/// safe to show to callers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The caller-supplied id could not be parsed into the store's id format.
    #[error("Invalid {} id format.", .entity.to_lowercase())]
    InvalidIdentifier { entity: &'static str },

    /// No record matched the id (and owner, for mutations).
    #[error("{entity} not found.")]
    NotFound { entity: &'static str, id: String },

    /// An update matched an owned record but changed nothing.
    #[error("No changes provided")]
    NoChangeApplied,

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The credential was missing, malformed, forged, expired or revoked.
    #[error("{0}")]
    Unauthorized(String),
}

impl CoreError {
    /// The one message every rejected credential produces.
    pub fn unauthorized() -> Self {
        CoreError::Unauthorized("Unauthorized".into())
    }
}
