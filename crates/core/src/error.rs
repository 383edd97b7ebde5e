//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// uniqueness conflicts, missing entities). The boundary layer owns the
/// mapping to HTTP status codes; the domain never catches its own errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required value failed validation (e.g. blank name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A uniqueness conflict (seller name taken, product name taken within a seller).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A referenced seller or product does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Unanticipated failure (storage, broken invariant). Detail is logged at
    /// the boundary and never exposed to the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
