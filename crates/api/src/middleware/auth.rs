//! Request extractors for credentials, JSON bodies and path parameters.

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use axum::http::header::AUTHORIZATION;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use poopyrus_core::types::OwnerId;

use crate::error::AppError;
use crate::state::AppState;

/// Split an `Authorization` header value into scheme and credentials.
///
/// The scheme comparison is case-insensitive; empty credentials yield `None`.
fn split_authorization<'a>(parts: &'a Parts, scheme: &str) -> Option<Result<&'a str, ()>> {
    let value = parts.headers.get(AUTHORIZATION)?;
    let parsed = value
        .to_str()
        .ok()
        .and_then(|v| v.trim().split_once(' '))
        .filter(|(s, _)| s.eq_ignore_ascii_case(scheme))
        .map(|(_, credentials)| credentials.trim())
        .filter(|c| !c.is_empty())
        .ok_or(());
    Some(parsed)
}

/// Authenticated caller, resolved from a Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// A missing header or a non-Bearer scheme is rejected with 403 before the
/// identity provider is consulted; a token the provider refuses is 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Stable user id from the identity provider; scopes updates and deletes.
    pub user_id: OwnerId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match split_authorization(parts, "Bearer") {
            None => return Err(AppError::NotAuthenticated("Not authenticated")),
            Some(Err(())) => {
                return Err(AppError::NotAuthenticated(
                    "Invalid authentication credentials",
                ))
            }
            Some(Ok(token)) => token,
        };

        let user_id = state.identity.verify(token).await?;
        tracing::debug!(user_id = %user_id, "Bearer token verified");

        Ok(AuthUser { user_id })
    }
}

/// Email and password from an HTTP Basic `Authorization` header.
#[derive(Clone)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl BasicCredentials {
    /// Decode the `base64(email:password)` credential.
    fn decode(encoded: &str) -> Option<Self> {
        let bytes = STANDARD.decode(encoded).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (email, password) = text.split_once(':')?;
        Some(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

impl<S: Send + Sync> FromRequestParts<S> for BasicCredentials {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match split_authorization(parts, "Basic") {
            Some(Ok(encoded)) => Self::decode(encoded).ok_or(AppError::BasicAuthRequired),
            _ => Err(AppError::BasicAuthRequired),
        }
    }
}

/// JSON body extractor that reports malformed bodies as `{"detail": ...}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path extractor that reports undecodable segments as `{"detail": ...}`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
