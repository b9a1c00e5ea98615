//! Handlers for the `/logs` resource (activity entries such as walks or feedings).
//!
//! Same contract as pets: authenticated reads across all owners, owner-scoped
//! writes.

use axum::extract::State;
use axum::Json;
use poopyrus_db::models::log::{CreateLog, Log, UpdateLog};
use poopyrus_db::models::{CreatedId, SuccessResult};
use poopyrus_db::repositories::LogRepo;

use crate::error::AppResult;
use crate::middleware::auth::{AppJson, AppPath, AuthUser};
use crate::state::AppState;

/// GET /v1/logs
pub async fn list_logs(_auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Log>>> {
    let logs = LogRepo::list(state.store.as_ref()).await?;
    Ok(Json(logs))
}

/// GET /v1/logs/{id}
pub async fn get_log(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(log_id): AppPath<String>,
) -> AppResult<Json<Log>> {
    let log = LogRepo::find_by_id(state.store.as_ref(), &log_id).await?;
    Ok(Json(log))
}

/// POST /v1/logs
pub async fn create_log(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateLog>,
) -> AppResult<Json<CreatedId>> {
    let id = LogRepo::create(state.store.as_ref(), &auth.user_id, &input).await?;

    tracing::info!(log_id = %id, user_id = %auth.user_id, "Log created");

    Ok(Json(CreatedId { id }))
}

/// PATCH /v1/logs/{id}
///
/// `{"note": null}` clears the note; omitting `note` keeps it.
pub async fn update_log(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(log_id): AppPath<String>,
    AppJson(input): AppJson<UpdateLog>,
) -> AppResult<Json<SuccessResult>> {
    LogRepo::update(state.store.as_ref(), &auth.user_id, &log_id, &input).await?;

    tracing::info!(log_id = %log_id, user_id = %auth.user_id, "Log updated");

    Ok(Json(SuccessResult::ok()))
}

/// DELETE /v1/logs/{id}
pub async fn delete_log(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(log_id): AppPath<String>,
) -> AppResult<Json<SuccessResult>> {
    LogRepo::delete(state.store.as_ref(), &auth.user_id, &log_id).await?;

    tracing::info!(log_id = %log_id, user_id = %auth.user_id, "Log deleted");

    Ok(Json(SuccessResult::ok()))
}
