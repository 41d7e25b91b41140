//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the insert and patch DTOs the repositories accept.

pub mod landmark;
pub mod user;
pub mod visit_plan;
pub mod visited;
