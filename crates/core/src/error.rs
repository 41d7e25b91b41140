/// Domain-level error shared by every Waymark crate.
///
/// The HTTP layer maps each variant onto a status code. Records owned by
/// someone else are reported as [`CoreError::NotFound`].
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// A request referenced another entity that does not exist for the caller.
    #[error("{entity} with ID {reference} not found or not owned by you")]
    MissingReference {
        entity: &'static str,
        reference: String,
    },

    #[error("{0}")]
    Validation(String),

    /// The record would duplicate one that already exists.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),
}
