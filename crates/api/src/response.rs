//! Shared response bodies for API handlers.
//!
//! Entities are returned as bare JSON; only acknowledgements without an
//! entity use the types here.

use serde::Serialize;

/// `{ "message": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Response to a landmark delete, reporting how many plans went with it.
#[derive(Debug, Serialize)]
pub struct LandmarkDeletedResponse {
    pub message: &'static str,
    pub deleted_plans: u64,
}
