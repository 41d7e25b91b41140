//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT generation and validation.
//! - [`cookie`] -- the `token` cookie carrying the JWT for browsers.

pub mod cookie;
pub mod jwt;
pub mod password;
