//! Handlers for the `/pets` resource.
//!
//! All endpoints require authentication via [`AuthUser`]. Reads are not
//! owner-filtered; updates and deletes only touch the caller's own pets.

use axum::extract::State;
use axum::Json;
use poopyrus_db::models::pet::{CreatePet, Pet, UpdatePet};
use poopyrus_db::models::{CreatedId, SuccessResult};
use poopyrus_db::repositories::PetRepo;

use crate::error::AppResult;
use crate::middleware::auth::{AppJson, AppPath, AuthUser};
use crate::state::AppState;

/// GET /v1/pets
pub async fn list_pets(_auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Pet>>> {
    let pets = PetRepo::list(state.store.as_ref()).await?;
    Ok(Json(pets))
}

/// GET /v1/pets/{id}
pub async fn get_pet(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(pet_id): AppPath<String>,
) -> AppResult<Json<Pet>> {
    let pet = PetRepo::find_by_id(state.store.as_ref(), &pet_id).await?;
    Ok(Json(pet))
}

/// POST /v1/pets
pub async fn create_pet(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePet>,
) -> AppResult<Json<CreatedId>> {
    let id = PetRepo::create(state.store.as_ref(), &auth.user_id, &input).await?;

    tracing::info!(pet_id = %id, user_id = %auth.user_id, "Pet created");

    Ok(Json(CreatedId { id }))
}

/// PATCH /v1/pets/{id}
///
/// Apply only the supplied fields. 404 when the pet is missing or owned by
/// someone else.
pub async fn update_pet(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(pet_id): AppPath<String>,
    AppJson(input): AppJson<UpdatePet>,
) -> AppResult<Json<SuccessResult>> {
    PetRepo::update(state.store.as_ref(), &auth.user_id, &pet_id, &input).await?;

    tracing::info!(pet_id = %pet_id, user_id = %auth.user_id, "Pet updated");

    Ok(Json(SuccessResult::ok()))
}

/// DELETE /v1/pets/{id}
pub async fn delete_pet(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(pet_id): AppPath<String>,
) -> AppResult<Json<SuccessResult>> {
    PetRepo::delete(state.store.as_ref(), &auth.user_id, &pet_id).await?;

    tracing::info!(pet_id = %pet_id, user_id = %auth.user_id, "Pet deleted");

    Ok(Json(SuccessResult::ok()))
}
