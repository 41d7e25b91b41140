//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument and the owning user's id
//! wherever rows are user-scoped.

pub mod landmark_repo;
pub mod user_repo;
pub mod visit_plan_repo;
pub mod visited_repo;

pub use landmark_repo::LandmarkRepo;
pub use user_repo::UserRepo;
pub use visit_plan_repo::VisitPlanRepo;
pub use visited_repo::VisitedRepo;
