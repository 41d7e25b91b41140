pub mod auth;
pub mod health;
pub mod landmarks;
pub mod visit_plans;
pub mod visited;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                  register (public)
/// /auth/login                     login (public)
/// /auth/logout                    logout (public, clears cookie)
/// /auth/me                        current user
///
/// /landmarks                      list, create
/// /landmarks/{id}                 get, update, delete (cascades to plans)
///
/// /visited                        list, create
/// /visited/landmark/{id}          visits of one landmark
/// /visited/detail/{id}            get
/// /visited/{id}                   get, update, delete
///
/// /visitplans                     list, create
/// /visitplans/{id}                get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/landmarks", landmarks::router())
        .nest("/visited", visited::router())
        .nest("/visitplans", visit_plans::router())
}
