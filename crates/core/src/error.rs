use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Rule failures raised by entities and identifiers.
///
/// Store failures are not domain errors; they live in the data-access layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or blank.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Entity state the lifecycle should never produce (e.g. a store handing
    /// back a non-positive id).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Unparseable or negative record identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
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
}
