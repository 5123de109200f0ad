//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic business failures live here (bad input, broken invariants,
/// stale state). Degenerate-but-valid inputs, like an option form that is still
/// being filled in, are not errors and never produce one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A positional lookup fell outside the sequence.
    #[error("index {index} out of bounds (len {len})")]
    InvalidIndex { index: usize, len: usize },

    /// A requested record was not found.
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. stale version, repeated transition).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_index(index: usize, len: usize) -> Self {
        Self::InvalidIndex { index, len }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_index_message_names_both_bounds() {
        let err = DomainError::invalid_index(99, 3);
        assert_eq!(err.to_string(), "index 99 out of bounds (len 3)");
    }

    #[test]
    fn helpers_build_matching_variants() {
        assert!(matches!(DomainError::validation("x"), DomainError::Validation(m) if m == "x"));
        assert!(matches!(DomainError::conflict("y"), DomainError::Conflict(m) if m == "y"));
        assert_eq!(DomainError::not_found(), DomainError::NotFound);
    }
}
