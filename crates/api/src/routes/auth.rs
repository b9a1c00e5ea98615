use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes.
///
/// ```text
/// GET    /auth/login        -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/login", get(auth::login))
}
