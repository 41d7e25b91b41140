//! Waymark REST client and UI-side state.
//!
//! [`api::ApiClient`] talks to the server; [`state`] holds what the single
//! page app shows as an explicit value driven by [`state::reduce`]. The
//! [`search`] and [`render`] modules are the pieces of UI logic worth testing
//! away from a browser.

pub mod api;
pub mod error;
pub mod models;
pub mod render;
pub mod search;
pub mod state;
