//! Error handling for the admin security layer
//!
//! Every rejection produced by the validator, query builder, rate limiter,
//! or operation guard is a `SecurityError`. Callers treat all variants
//! uniformly as "reject the operation"; the variant and message exist for
//! audit records and operator-facing diagnostics.

use thiserror::Error;

/// Result type for security-sensitive operations
pub type SecurityResult<T> = Result<T, SecurityError>;

/// Enum representing the stable set of security rejection causes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SecurityError {
    /// A required field was missing or empty
    #[error("{0}")]
    EmptyRequiredField(String),

    /// Input exceeds the maximum length registered for its field type
    #[error("{0}")]
    TooLong(String),

    /// Input matched a dangerous injection pattern
    #[error("{0}")]
    DangerousContent(String),

    /// A required field was reduced to nothing by sanitization
    #[error("{0}")]
    EmptySanitizedField(String),

    /// Field name does not match the identifier pattern
    #[error("Invalid field name: {0}")]
    InvalidFieldName(String),

    /// Numeric update field failed to parse or fell outside its range
    #[error("{0}")]
    InvalidNumericValue(String),

    /// Input format is invalid (email or URI shape)
    #[error("{0}")]
    InvalidFormat(String),

    /// Operation denied by the rate limiter
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Opaque downgrade applied to non-security errors at the guard boundary
    #[error("An error occurred processing your request")]
    Unexpected,
}

impl SecurityError {
    /// Audit category for this rejection
    pub fn violation_type(&self) -> &'static str {
        match self {
            SecurityError::EmptyRequiredField(_)
            | SecurityError::TooLong(_)
            | SecurityError::DangerousContent(_)
            | SecurityError::EmptySanitizedField(_)
            | SecurityError::InvalidFormat(_) => "input_validation",
            SecurityError::InvalidFieldName(_) | SecurityError::InvalidNumericValue(_) => {
                "schema_validation"
            }
            SecurityError::RateLimited => "rate_limit",
            SecurityError::Unexpected => "unexpected_error",
        }
    }

    /// Returns true if the caller may retry the operation unchanged later
    pub fn is_transient(&self) -> bool {
        matches!(self, SecurityError::RateLimited)
    }
}
