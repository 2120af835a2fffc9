//! Field types and their validation limits
//!
//! A `FieldType` tags a value with its intended semantic role and selects
//! both the maximum accepted length and the sanitization routine applied
//! after the dangerous-pattern scan.

/// Fallback maximum length the original schema applied to unlisted tags.
/// The enum below makes unlisted tags unrepresentable, so this constant
/// only documents the contract for future additions.
pub const DEFAULT_MAX_LEN: usize = 255;

/// Semantic role of a user-supplied value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Name,
    Email,
    Password,
    Text,
    Description,
    Search,
    CompanyName,
    Industry,
    Role,
    Plan,
    Status,
    Language,
    Size,
    DefaultRole,
    Experience,
    MonthlyLimit,
    DailyLimit,
    MaxUsers,
    Uri,
    RefreshInterval,
}

impl FieldType {
    /// Maximum accepted length for this field type
    pub fn max_len(self) -> usize {
        match self {
            FieldType::Name => 100,
            FieldType::Email => 255,
            FieldType::Password => 128,
            FieldType::Text => 1000,
            FieldType::Description => 2000,
            FieldType::Search => 100,
            FieldType::CompanyName => 150,
            FieldType::Industry => 100,
            FieldType::Role => 50,
            FieldType::Plan => 20,
            FieldType::Status => 20,
            FieldType::Language => 10,
            FieldType::Size => 20,
            FieldType::DefaultRole => 30,
            FieldType::Experience => 20,
            FieldType::MonthlyLimit => 10,
            FieldType::DailyLimit => 10,
            FieldType::MaxUsers => 10,
            FieldType::Uri => 500,
            FieldType::RefreshInterval => 10,
        }
    }

    /// Tag used in error messages and audit records
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Name => "name",
            FieldType::Email => "email",
            FieldType::Password => "password",
            FieldType::Text => "text",
            FieldType::Description => "description",
            FieldType::Search => "search",
            FieldType::CompanyName => "company_name",
            FieldType::Industry => "industry",
            FieldType::Role => "role",
            FieldType::Plan => "plan",
            FieldType::Status => "status",
            FieldType::Language => "language",
            FieldType::Size => "size",
            FieldType::DefaultRole => "default_role",
            FieldType::Experience => "experience",
            FieldType::MonthlyLimit => "monthly_limit",
            FieldType::DailyLimit => "daily_limit",
            FieldType::MaxUsers => "max_users",
            FieldType::Uri => "uri",
            FieldType::RefreshInterval => "refresh_interval",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
