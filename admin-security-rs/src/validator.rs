//! Input validation and sanitization
//!
//! The single entry point every admin-panel value passes through before
//! it may appear in a database filter or update document. Validation
//! order is fixed: requiredness, length, dangerous-pattern scan, then the
//! field-type-specific sanitizer. A value either comes back fully
//! sanitized or the call fails; nothing partial escapes.

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::errors::{SecurityError, SecurityResult};
use crate::fields::FieldType;
use crate::patterns;
use crate::sanitize;

lazy_static! {
    static ref EMAIL_SHAPE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    static ref URI_SHAPE: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://\S+$").unwrap();
}

/// Characters that must never appear in a validated email address
const EMAIL_BANNED_CHARS: &[char] = &[
    '<', '>', '"', '\'', '(', ')', '[', ']', ';', ':', ',', ' ',
];

/// URI schemes rejected outright
const DANGEROUS_SCHEMES: &[&str] = &["javascript", "vbscript", "data", "file", "ftp", "gopher"];

/// Validate and sanitize a single user-supplied value.
///
/// `value` is `None` when the originating form field was absent. The
/// returned string is safe to place in a filter or update document for
/// the field type given. All failures are `SecurityError`s; callers
/// treat every variant as a rejection of the whole operation.
pub fn validate_and_sanitize(
    value: Option<&str>,
    field_type: FieldType,
    required: bool,
    allow_html: bool,
) -> SecurityResult<String> {
    let trimmed = match value {
        None => {
            if required {
                return Err(SecurityError::EmptyRequiredField(format!(
                    "Field '{}' is required",
                    field_type
                )));
            }
            return Ok(String::new());
        }
        Some(v) => v.trim(),
    };

    if required && trimmed.is_empty() {
        return Err(SecurityError::EmptyRequiredField(format!(
            "Field '{}' cannot be empty",
            field_type
        )));
    }

    let max_len = field_type.max_len();
    if trimmed.chars().count() > max_len {
        return Err(SecurityError::TooLong(format!(
            "Field '{}' exceeds maximum length of {} characters",
            field_type, max_len
        )));
    }

    // The scan runs before any sanitizer so that dangerous input is
    // rejected rather than quietly rewritten.
    if let Some(pattern) = patterns::first_dangerous_match(trimmed) {
        return Err(SecurityError::DangerousContent(format!(
            "Field '{}' contains potentially dangerous content: {}",
            field_type, pattern
        )));
    }

    let sanitized = match field_type {
        FieldType::Email => sanitize_email(trimmed)?,
        FieldType::Name => sanitize_name(trimmed),
        FieldType::Uri => sanitize_uri(trimmed)?,
        _ => sanitize_text(trimmed, allow_html),
    };

    if required && sanitized.is_empty() {
        return Err(SecurityError::EmptySanitizedField(format!(
            "Field '{}' became empty after sanitization",
            field_type
        )));
    }

    Ok(sanitized)
}

/// Enforce the `local@domain.tld` shape and lower-case the address
fn sanitize_email(email: &str) -> SecurityResult<String> {
    if !EMAIL_SHAPE.is_match(email) {
        return Err(SecurityError::InvalidFormat(
            "Invalid email format".to_string(),
        ));
    }

    if email.contains(EMAIL_BANNED_CHARS) {
        return Err(SecurityError::InvalidFormat(
            "Email contains invalid characters".to_string(),
        ));
    }

    Ok(email.to_lowercase())
}

/// Keep name-safe characters and normalize internal whitespace
fn sanitize_name(name: &str) -> String {
    let retained = sanitize::retain_name_chars(name);
    sanitize::collapse_whitespace(&retained).trim().to_string()
}

/// Require a `scheme://...` shape and reject dangerous schemes
fn sanitize_uri(uri: &str) -> SecurityResult<String> {
    let escaped = sanitize::escape_html(uri);

    if !URI_SHAPE.is_match(&escaped) {
        return Err(SecurityError::InvalidFormat(
            "Invalid URI format".to_string(),
        ));
    }

    let parsed = Url::parse(&escaped)
        .map_err(|e| SecurityError::InvalidFormat(format!("Invalid URI: {}", e)))?;

    let scheme = parsed.scheme().to_lowercase();
    if DANGEROUS_SCHEMES.contains(&scheme.as_str()) {
        return Err(SecurityError::DangerousContent(format!(
            "Dangerous URI scheme: {}",
            scheme
        )));
    }

    Ok(escaped)
}

/// Default sanitizer for free text and enum-like short fields
fn sanitize_text(text: &str, allow_html: bool) -> String {
    let escaped = if allow_html {
        text.to_string()
    } else {
        sanitize::escape_html(text)
    };

    let stripped = sanitize::strip_control_chars(&escaped);
    let normalized = sanitize::normalize_nfkc(&stripped);
    sanitize::strip_control_ranges(&normalized)
        .trim()
        .to_string()
}
