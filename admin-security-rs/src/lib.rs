//! # Admin Security Library
//!
//! Input validation, sanitization, and injection defense for the
//! SalesBuddy admin panel. Every mutating admin operation is routed
//! through this crate before touching the document database: values are
//! validated against per-field-type length limits and a dangerous-pattern
//! denylist, filter and update documents are built from sanitized parts
//! only, and a guard enforces rate limiting and audit logging around each
//! action.
//!
//! ## Features
//!
//! - Field-type-aware validation and sanitization
//! - Secure filter and update-document builders
//! - Injectable sliding-window rate limiter
//! - Structured, write-only audit logging
//! - Operation guard that never leaks internal error detail

mod errors;

pub mod audit;
pub mod fields;
pub mod guard;
pub mod patterns;
pub mod query;
pub mod rate_limit;
pub mod sanitize;
pub mod validator;

pub use errors::{SecurityError, SecurityResult};
pub use fields::FieldType;
pub use guard::OperationGuard;
pub use query::{build_filter, build_update_document, FilterOp};
pub use rate_limit::RateLimiter;
pub use validator::validate_and_sanitize;

/// Re-export commonly used items for convenience
pub mod prelude {
    pub use crate::audit::AuditLogger;
    pub use crate::errors::{SecurityError, SecurityResult};
    pub use crate::fields::FieldType;
    pub use crate::guard::OperationGuard;
    pub use crate::query::{build_filter, build_update_document, FilterOp};
    pub use crate::rate_limit::RateLimiter;
    pub use crate::validator::validate_and_sanitize;
}

/// Version of the security library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
