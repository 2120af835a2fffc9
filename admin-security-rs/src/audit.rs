//! Security audit logging
//!
//! Every rejected or failed security-sensitive operation produces one
//! structured record, serialized and emitted through the `log` facade
//! under the `audit` target. The sink is write-only and best-effort:
//! there is no read path, rotation, or persistence guarantee.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Fixed severity stamped on every violation record
pub const VIOLATION_SEVERITY: &str = "HIGH";

/// One security violation, as written to the audit sink
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub actor_id: Option<String>,
    pub action: String,
    pub field: String,
    pub violation_type: String,
    pub details: String,
    pub severity: &'static str,
}

/// Write-only audit sink
#[derive(Debug, Clone, Default)]
pub struct AuditLogger;

impl AuditLogger {
    pub fn new() -> Self {
        Self
    }

    /// Build the record for one violation
    pub fn record(
        &self,
        actor_id: Option<&str>,
        action: &str,
        field: &str,
        violation_type: &str,
        details: &str,
    ) -> AuditRecord {
        AuditRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id: actor_id.map(str::to_string),
            action: action.to_string(),
            field: field.to_string(),
            violation_type: violation_type.to_string(),
            details: details.to_string(),
            severity: VIOLATION_SEVERITY,
        }
    }

    /// Record a violation and emit it
    pub fn log_violation(
        &self,
        actor_id: Option<&str>,
        action: &str,
        field: &str,
        violation_type: &str,
        details: &str,
    ) {
        let record = self.record(actor_id, action, field, violation_type, details);
        match serde_json::to_string(&record) {
            Ok(serialized) => log::warn!(target: "audit", "security violation: {}", serialized),
            // Serialization of a flat string record cannot realistically
            // fail, but the audit path must never panic.
            Err(e) => log::warn!(
                target: "audit",
                "security violation (unserializable record): action={} type={} error={}",
                action,
                violation_type,
                e
            ),
        }
    }
}
