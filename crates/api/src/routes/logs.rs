use axum::routing::get;
use axum::Router;

use crate::handlers::logs;
use crate::state::AppState;

/// Log routes.
///
/// ```text
/// GET    /logs              -> list_logs
/// POST   /logs              -> create_log
/// GET    /logs/{id}         -> get_log
/// PATCH  /logs/{id}         -> update_log
/// DELETE /logs/{id}         -> delete_log
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logs", get(logs::list_logs).post(logs::create_log))
        .route(
            "/logs/{id}",
            get(logs::get_log)
                .patch(logs::update_log)
                .delete(logs::delete_log),
        )
}
