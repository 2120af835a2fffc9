//! Secure query building
//!
//! Turns raw field/value pairs destined for a document-database filter or
//! update into sanitized equivalents. Field names are gated by a strict
//! identifier pattern; values are routed through the input validator with
//! rules selected per operator or per field name. The returned documents
//! never contain an unvalidated field name or a raw value.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::{SecurityError, SecurityResult};
use crate::fields::FieldType;
use crate::validator::validate_and_sanitize;

/// Inclusive bounds for numeric usage/limit fields
pub const NUMERIC_MIN: i64 = 0;
pub const NUMERIC_MAX: i64 = 999_999;

lazy_static! {
    static ref FIELD_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").unwrap();
}

/// Filter operators the builder will render.
///
/// Keeping the set closed means a caller can never smuggle an arbitrary
/// `$`-prefixed operator into a filter document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Regex,
    In,
    NotIn,
}

impl FilterOp {
    /// Wire form of the operator
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Eq => "$eq",
            FilterOp::Ne => "$ne",
            FilterOp::Gt => "$gt",
            FilterOp::Gte => "$gte",
            FilterOp::Lt => "$lt",
            FilterOp::Lte => "$lte",
            FilterOp::Regex => "$regex",
            FilterOp::In => "$in",
            FilterOp::NotIn => "$nin",
        }
    }
}

/// Validation rule applied to one update field
#[derive(Debug, Clone, Copy)]
enum UpdateRule {
    /// Sanitize the value under the given field type
    Sanitize(FieldType),
    /// Parse the sanitized value as an integer and range-check it
    BoundedInt(FieldType),
}

lazy_static! {
    /// Field-name dispatch table mirroring the business schema. Unlisted
    /// fields fall back to plain text rules.
    static ref UPDATE_RULES: HashMap<&'static str, UpdateRule> = {
        let mut rules = HashMap::new();
        rules.insert("firstName", UpdateRule::Sanitize(FieldType::Name));
        rules.insert("lastName", UpdateRule::Sanitize(FieldType::Name));
        rules.insert("email", UpdateRule::Sanitize(FieldType::Email));
        rules.insert("description", UpdateRule::Sanitize(FieldType::Description));
        rules.insert("feedback", UpdateRule::Sanitize(FieldType::Description));
        rules.insert("aiRatingFeedback", UpdateRule::Sanitize(FieldType::Description));
        rules.insert("industry", UpdateRule::Sanitize(FieldType::Industry));
        rules.insert("company", UpdateRule::Sanitize(FieldType::Industry));
        rules.insert("settings.industry", UpdateRule::Sanitize(FieldType::Industry));
        rules.insert("settings.salesRole", UpdateRule::Sanitize(FieldType::Industry));
        rules.insert("role", UpdateRule::Sanitize(FieldType::Role));
        rules.insert("settings.experienceLevel", UpdateRule::Sanitize(FieldType::Role));
        rules.insert("subscription.plan", UpdateRule::Sanitize(FieldType::Plan));
        rules.insert("subscription.status", UpdateRule::Sanitize(FieldType::Plan));
        rules.insert("language", UpdateRule::Sanitize(FieldType::Language));
        rules.insert("size", UpdateRule::Sanitize(FieldType::Size));
        rules.insert("usage.monthlyLimit", UpdateRule::BoundedInt(FieldType::MonthlyLimit));
        rules.insert("usage.dailyLimit", UpdateRule::BoundedInt(FieldType::DailyLimit));
        rules.insert("subscription.maxUsers", UpdateRule::BoundedInt(FieldType::MaxUsers));
        rules
    };
}

fn check_field_name(field: &str) -> SecurityResult<()> {
    if FIELD_NAME.is_match(field) {
        Ok(())
    } else {
        Err(SecurityError::InvalidFieldName(field.to_string()))
    }
}

/// Build a secure single-field filter document.
///
/// For `Regex`, the value is escaped so it only ever matches literally.
/// For `In`/`NotIn`, every element of the array is validated as plain
/// text. For the scalar operators, string values are sanitized as text
/// and numbers and booleans pass through untouched.
pub fn build_filter(field: &str, value: &Value, op: FilterOp) -> SecurityResult<Value> {
    check_field_name(field)?;

    let safe_value = match op {
        FilterOp::Regex => match value {
            Value::String(s) => Value::String(regex::escape(s)),
            _ => {
                return Err(SecurityError::InvalidFormat(
                    "Regex operator requires string value".to_string(),
                ))
            }
        },
        FilterOp::In | FilterOp::NotIn => match value {
            Value::Array(items) => {
                let mut sanitized = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => sanitized.push(Value::String(validate_and_sanitize(
                            Some(s),
                            FieldType::Text,
                            true,
                            false,
                        )?)),
                        other => sanitized.push(other.clone()),
                    }
                }
                Value::Array(sanitized)
            }
            _ => {
                return Err(SecurityError::InvalidFormat(format!(
                    "{} operator requires array value",
                    op.as_str()
                )))
            }
        },
        _ => match value {
            Value::String(s) => {
                Value::String(validate_and_sanitize(Some(s), FieldType::Text, true, false)?)
            }
            other => other.clone(),
        },
    };

    let mut operator_doc = Map::new();
    operator_doc.insert(op.as_str().to_string(), safe_value);

    let mut filter = Map::new();
    filter.insert(field.to_string(), Value::Object(operator_doc));
    Ok(Value::Object(filter))
}

/// Build a secure update document from raw field/value string pairs.
///
/// Each field name is gated, then its value is routed through the rule
/// table above. Numeric limit fields come back as JSON numbers; all
/// other fields come back as sanitized strings.
pub fn build_update_document(fields: &[(&str, &str)]) -> SecurityResult<Map<String, Value>> {
    let mut document = Map::new();

    for (field, raw) in fields {
        check_field_name(field)?;

        let rule = UPDATE_RULES
            .get(field)
            .copied()
            .unwrap_or(UpdateRule::Sanitize(FieldType::Text));

        let value = match rule {
            UpdateRule::Sanitize(field_type) => {
                Value::String(validate_and_sanitize(Some(raw), field_type, true, false)?)
            }
            UpdateRule::BoundedInt(field_type) => {
                let sanitized = validate_and_sanitize(Some(raw), field_type, true, false)?;
                let parsed: i64 = sanitized.parse().map_err(|_| {
                    SecurityError::InvalidNumericValue(format!(
                        "Invalid numeric value for '{}': {}",
                        field, raw
                    ))
                })?;
                if !(NUMERIC_MIN..=NUMERIC_MAX).contains(&parsed) {
                    return Err(SecurityError::InvalidNumericValue(format!(
                        "Value {} for '{}' is out of valid range",
                        parsed, field
                    )));
                }
                Value::Number(parsed.into())
            }
        };

        document.insert((*field).to_string(), value);
    }

    Ok(document)
}
