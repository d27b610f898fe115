use std::sync::OnceLock;

use regex::Regex;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Constraint names follow the PostgreSQL defaults (`{table}_{columns}_key`,
/// `{table}_{column}_fkey`, `{table}_{column}_check`). Table names are
/// resolved against the known HRMS tables first so multi-word tables such as
/// `user_accounts` split correctly; unknown names fall back to the first
/// underscore segment.
pub struct ConstraintParser;

/// Tables of the HRMS schema, longest-prefix matched against constraint names
const KNOWN_TABLES: &[&str] = &[
    "activity",
    "approval_history",
    "attendance",
    "department",
    "employee",
    "participation",
    "password_reset_tokens",
    "point",
    "point_conversion_rules",
    "point_to_money_history",
    "point_transaction_history",
    "refresh_tokens",
    "request",
    "role",
    "user_accounts",
];

const CONSTRAINT_SUFFIXES: &[&str] = &["_fkey", "_pkey", "_key", "_check", "_idx"];

/// Compiled regex patterns for constraint parsing
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // Matches "Key (field)=(value)" in PostgreSQL DETAIL lines
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            // PostgreSQL says `relation` for not-null and check violations
            table_name: Regex::new(r#"(?:table|relation) "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique constraint violation.
    ///
    /// # Arguments
    /// * `message` - The database error message, DETAIL line included when available
    /// * `constraint_name` - Optional constraint name from the database
    ///
    /// # Returns
    /// Optional tuple of (entity, field, value) if parsing succeeds
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = Self::extract_key_value_from_message(message)
                .map(|(_, value)| value)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = Self::extract_key_value_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a not null constraint violation.
    ///
    /// # Returns
    /// Optional tuple of (entity, field) if parsing succeeds
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .or_else(|| {
                constraint_name.and_then(|c| Self::parse_constraint_name(c).map(|(e, _)| e))
            })
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a foreign key constraint violation.
    ///
    /// # Returns
    /// Optional tuple of (entity, field, referenced_value) if parsing succeeds
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = Self::extract_key_value_from_message(message)
                .map(|(_, value)| value)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = Self::extract_key_value_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a check constraint violation.
    ///
    /// # Returns
    /// Optional tuple of (entity, field) if parsing succeeds
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(parsed) = constraint_name.and_then(Self::parse_constraint_name) {
            return Some(parsed);
        }

        let field = Self::extract_column_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Splits a constraint name into (table, columns).
    ///
    /// - `employee_email_key` -> (`employee`, `email`)
    /// - `employee_tax_code_key` -> (`employee`, `tax_code`)
    /// - `user_accounts_username_key` -> (`user_accounts`, `username`)
    /// - `employee_role_id_fkey` -> (`employee`, `role_id`)
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))
            .unwrap_or(constraint_name);

        let known = KNOWN_TABLES
            .iter()
            .filter(|table| {
                stem.len() > table.len() + 1
                    && stem.starts_with(*table)
                    && stem.as_bytes()[table.len()] == b'_'
            })
            .max_by_key(|table| table.len());

        if let Some(table) = known {
            let field = &stem[table.len() + 1..];
            return Some((table.to_string(), field.to_string()));
        }

        let (entity, field) = stem.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts `(field, value)` from a `Key (field)=(value)` fragment
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }
}
