use axum::routing::get;
use axum::Router;

use crate::handlers::pets;
use crate::state::AppState;

/// Pet routes.
///
/// ```text
/// GET    /pets              -> list_pets
/// POST   /pets              -> create_pet
/// GET    /pets/{id}         -> get_pet
/// PATCH  /pets/{id}         -> update_pet
/// DELETE /pets/{id}         -> delete_pet
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pets", get(pets::list_pets).post(pets::create_pet))
        .route(
            "/pets/{id}",
            get(pets::get_pet)
                .patch(pets::update_pet)
                .delete(pets::delete_pet),
        )
}
