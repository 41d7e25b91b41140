//! Request handlers, one submodule per resource.
//!
//! Handlers delegate to the repositories in `waymark_db`, route integrity
//! rules through [`AppState::integrity`](crate::state::AppState::integrity)
//! and map errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod landmarks;
pub mod visit_plans;
pub mod visited;
