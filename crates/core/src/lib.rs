//! Domain rules for Waymark: landmarks, visit records, visit plans and the
//! integrity rules that keep references between them consistent.
//!
//! This crate has no database or HTTP dependencies.

pub mod error;
pub mod integrity;
pub mod landmark;
pub mod plan;
pub mod search;
pub mod types;
pub mod visit;
