//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SurrealDB TEXT fields have no built-in length enforcement, so the
//! handler layer enforces reasonable UX limits.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Titles: product, category, idea, special offer, test entry
pub const MAX_TITLE_LEN: usize = 200;

/// Notes, descriptions, excerpts (order notes, SEO descriptions, etc.)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, zip, payment method, color codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / media paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_text() {
        assert!(validate_required_text("", "title", MAX_TITLE_LEN).is_err());
        assert!(validate_required_text("   ", "title", MAX_TITLE_LEN).is_err());
        assert!(validate_required_text("ok", "title", MAX_TITLE_LEN).is_ok());
    }

    #[test]
    fn rejects_over_length_text() {
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_required_text(&long, "title", MAX_TITLE_LEN).is_err());
        assert!(validate_optional_text(&Some(long), "subtitle", MAX_TITLE_LEN).is_err());
        assert!(validate_optional_text(&None, "subtitle", MAX_TITLE_LEN).is_ok());
    }
}
