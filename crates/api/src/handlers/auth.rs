//! Handler for the `/auth` resource.

use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::identity::SignIn;
use crate::middleware::auth::BasicCredentials;
use crate::state::AppState;

/// GET /v1/auth/login
///
/// Forward Basic email/password credentials to the identity provider and
/// relay the issued token. Any refusal is a plain 401.
pub async fn login(
    State(state): State<AppState>,
    credentials: BasicCredentials,
) -> AppResult<Json<SignIn>> {
    let sign_in = state
        .identity
        .sign_in(&credentials.email, &credentials.password)
        .await?;

    tracing::info!(email = %credentials.email, "User signed in");

    Ok(Json(sign_in))
}
