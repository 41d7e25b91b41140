//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a JWT in the
//!   `Authorization` header or the `token` cookie.

pub mod auth;
