//! Route definitions for the `/landmarks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::landmarks;
use crate::state::AppState;

/// Routes mounted at `/landmarks`.
///
/// ```text
/// GET    /        -> list_landmarks (?name, description, category)
/// POST   /        -> create_landmark
/// GET    /{id}    -> get_landmark
/// PUT    /{id}    -> update_landmark
/// DELETE /{id}    -> delete_landmark (cascades to plans)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(landmarks::list_landmarks).post(landmarks::create_landmark),
        )
        .route(
            "/{id}",
            get(landmarks::get_landmark)
                .put(landmarks::update_landmark)
                .delete(landmarks::delete_landmark),
        )
}
