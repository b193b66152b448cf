//! Domain failure taxonomy shared by every crate in the workspace.
//!
//! The `Display` output of each variant is the exact, user-facing message the
//! API puts in its `{ "success": false, "message": ... }` envelope.

/// Domain-level error raised by handlers, the authentication gate, and
/// request validation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No entity with the requested id exists.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// A request was structurally valid but semantically unacceptable.
    #[error("{0}")]
    Validation(String),

    /// A unique field already holds the submitted value.
    #[error("Duplicate key {field} entered")]
    Conflict { field: String },

    /// An identifier could not be parsed (cast failure).
    #[error("Resource not found with this id. Invalid {field}")]
    InvalidId { field: &'static str },

    /// No usable credential accompanied the request.
    #[error("{0}")]
    Unauthenticated(String),

    /// The credential token failed signature or structure validation.
    #[error("Your URL is invalid. Please try again later.")]
    InvalidCredential,

    /// The credential token was well formed but past its expiry.
    #[error("Your URL has expired. Please try again later.")]
    ExpiredCredential,
}

impl CoreError {
    /// Shorthand for the missing-required-field validation failure.
    pub fn missing_field(entity: &str, field: &str) -> Self {
        CoreError::Validation(format!("{entity} validation failed: {field} is required"))
    }
}
