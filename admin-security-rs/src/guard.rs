//! Operation guarding
//!
//! Explicit middleware composition replacing the original's implicit
//! decorator: a guard wraps an action closure, consults the rate limiter
//! before running it, funnels every violation to the audit logger, and
//! downgrades non-security errors to one opaque variant so internal
//! detail never reaches the end user.
//!
//! A guarded action has exactly three terminal outcomes: allowed and
//! succeeded, allowed and rejected with a `SecurityError`, or denied by
//! the rate limiter. There is no retry, backoff, or queueing.

use std::sync::Arc;

use crate::audit::AuditLogger;
use crate::errors::{SecurityError, SecurityResult};
use crate::rate_limit::RateLimiter;

/// Guard applied to every admin action
#[derive(Debug, Clone)]
pub struct OperationGuard {
    limiter: Arc<RateLimiter>,
    audit: AuditLogger,
}

impl OperationGuard {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self {
            limiter,
            audit: AuditLogger::new(),
        }
    }

    /// Run `op` under the guard.
    ///
    /// `action` names the operation and `field` labels the payload for
    /// audit records. Security errors from `op` are logged and
    /// propagated unchanged; any other error is logged by its type name
    /// only and replaced with `SecurityError::Unexpected`.
    pub fn run<T, E, F>(
        &self,
        actor_id: Option<&str>,
        action: &str,
        field: &str,
        op: F,
    ) -> SecurityResult<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: std::error::Error + 'static,
    {
        if !self.limiter.allowed() {
            self.audit.log_violation(
                actor_id,
                action,
                "global",
                "rate_limit",
                &format!("Operation '{}' rate limit exceeded", action),
            );
            return Err(SecurityError::RateLimited);
        }

        match op() {
            Ok(value) => Ok(value),
            Err(err) => {
                if let Some(security_err) = find_security_error(&err) {
                    self.audit.log_violation(
                        actor_id,
                        action,
                        field,
                        security_err.violation_type(),
                        &security_err.to_string(),
                    );
                    Err(security_err.clone())
                } else {
                    // Only the error's type name is recorded; the message
                    // could carry internals we must not disclose.
                    self.audit.log_violation(
                        actor_id,
                        action,
                        "error",
                        "unexpected_error",
                        &format!(
                            "Unexpected error in '{}': {}",
                            action,
                            std::any::type_name::<E>()
                        ),
                    );
                    Err(SecurityError::Unexpected)
                }
            }
        }
    }
}

/// Locate a `SecurityError` in `err` or anywhere along its source chain.
///
/// Callers often wrap security errors in an operation-level error enum;
/// the wrapper must not disguise a validation rejection as an unexpected
/// error.
fn find_security_error<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a SecurityError> {
    let mut cursor: Option<&'a (dyn std::error::Error + 'static)> = Some(err);
    while let Some(current) = cursor {
        if let Some(security_err) = current.downcast_ref::<SecurityError>() {
            return Some(security_err);
        }
        cursor = current.source();
    }
    None
}
