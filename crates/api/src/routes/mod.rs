pub mod auth;
pub mod health;
pub mod logs;
pub mod pets;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (basic auth)
///
/// /pets                                            list, create
/// /pets/{id}                                       get, update, delete
///
/// /logs                                            list, create
/// /logs/{id}                                       get, update, delete
/// ```
///
/// Every `/pets` and `/logs` route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(pets::router())
        .merge(logs::router())
}
