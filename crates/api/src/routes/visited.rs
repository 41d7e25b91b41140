//! Route definitions for the `/visited` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::visited;
use crate::state::AppState;

/// Routes mounted at `/visited`.
///
/// ```text
/// GET    /                -> list_visits (?date, visitor, rating)
/// POST   /                -> create_visit
/// GET    /landmark/{id}   -> list_visits_for_landmark
/// GET    /detail/{id}     -> get_visit
/// GET    /{id}            -> get_visit
/// PUT    /{id}            -> update_visit
/// DELETE /{id}            -> delete_visit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(visited::list_visits).post(visited::create_visit))
        .route("/landmark/{id}", get(visited::list_visits_for_landmark))
        .route("/detail/{id}", get(visited::get_visit))
        .route(
            "/{id}",
            get(visited::get_visit)
                .put(visited::update_visit)
                .delete(visited::delete_visit),
        )
}
