//! Domain error taxonomy shared by all crates.

use crate::types::DbId;

/// Domain-level error.
///
/// Covers deterministic business failures; infrastructure failures
/// (database, transport) live in the layer that owns them.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A requested entity does not exist (or is not visible in the
    /// requested state, e.g. editing a confirmed relocation).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation conflicts with current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
