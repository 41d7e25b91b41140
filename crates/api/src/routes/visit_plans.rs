//! Route definitions for the `/visitplans` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::visit_plans;
use crate::state::AppState;

/// Routes mounted at `/visitplans`.
///
/// ```text
/// GET    /        -> list_plans
/// POST   /        -> create_plan
/// GET    /{id}    -> get_plan
/// PUT    /{id}    -> update_plan
/// DELETE /{id}    -> delete_plan
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(visit_plans::list_plans).post(visit_plans::create_plan),
        )
        .route(
            "/{id}",
            get(visit_plans::get_plan)
                .put(visit_plans::update_plan)
                .delete(visit_plans::delete_plan),
        )
}
