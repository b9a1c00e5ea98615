use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use poopyrus_core::error::CoreError;
use poopyrus_db::repositories::RepoError;
use poopyrus_db::StoreError;
use serde_json::json;

/// Message used for every 500 response; the cause is only logged.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{"detail": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `poopyrus_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The document store failed or returned a malformed document.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// No usable bearer credential was presented (403, like a missing scheme).
    #[error("{0}")]
    NotAuthenticated(&'static str),

    /// No usable basic credential was presented to the login route.
    #[error("Not authenticated")]
    BasicAuthRequired,

    /// The request body could not be parsed as the expected JSON.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// A path segment could not be decoded (e.g. percent-encoded invalid UTF-8).
    #[error(transparent)]
    Path(#[from] PathRejection),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Core(e) => AppError::Core(e),
            RepoError::Store(e) => AppError::Store(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::InvalidIdentifier { .. } | CoreError::NoChangeApplied => {
                    (StatusCode::BAD_REQUEST, core.to_string())
                }
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id = %id, "Record not found");
                    (StatusCode::NOT_FOUND, core.to_string())
                }
                CoreError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            },

            // --- Store errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Document store error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::NotAuthenticated(msg) => (StatusCode::FORBIDDEN, (*msg).to_string()),
            AppError::BasicAuthRequired => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Json(rejection) => {
                // Content-type problems keep axum's status.
                let status = match rejection {
                    JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    other => other.status(),
                };
                (status, rejection.body_text())
            }
            AppError::Path(rejection) => (rejection.status(), rejection.body_text()),
        };

        let mut response = (status, axum::Json(json!({ "detail": message }))).into_response();
        if matches!(self, AppError::BasicAuthRequired) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        response
    }
}
