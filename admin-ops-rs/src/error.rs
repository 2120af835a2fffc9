//! Error handling for the admin operations layer
//!
//! Operations fail for one of two reasons: the security layer rejected
//! the input, or the document store reported a backend failure. Keeping
//! the security error in the source chain lets the operation guard
//! recognize a validation rejection inside a wrapped error and propagate
//! it instead of downgrading it to the opaque variant.

use admin_security_rs::SecurityError;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for admin operations
pub type AdminOpResult<T> = Result<T, AdminOpError>;

/// Errors raised inside a guarded admin operation
#[derive(Error, Debug)]
pub enum AdminOpError {
    /// The security layer rejected a field name or value
    #[error("{0}")]
    Security(#[from] SecurityError),

    /// The document store failed; the guard downgrades this to an
    /// opaque error before it reaches the user
    #[error("{0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_security_error_stays_in_source_chain() {
        let err: AdminOpError =
            SecurityError::InvalidFieldName("$where".to_string()).into();
        let source = err.source().expect("security source");
        assert!(source.downcast_ref::<SecurityError>().is_some());
    }

    #[test]
    fn test_store_error_has_no_security_source() {
        let err: AdminOpError = StoreError::Backend("connection reset".to_string()).into();
        let source = err.source().expect("store source");
        assert!(source.downcast_ref::<SecurityError>().is_none());
    }
}
