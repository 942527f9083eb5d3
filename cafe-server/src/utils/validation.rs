//! Input validation helpers
//!
//! Centralized text length constants and validation functions. The
//! store has no built-in length enforcement, so limits live here.

use crate::utils::AppError;

// ── Limits ──────────────────────────────────────────────────────────

/// Entity names: menu items, tables, rewards
pub const MAX_NAME_LEN: usize = 200;

/// Review comments, descriptions, notification messages
pub const MAX_TEXT_LEN: usize = 500;

/// Estimated preparation times offered to staff, in minutes
pub const ESTIMATED_TIME_CHOICES: std::ops::RangeInclusive<u32> = 5..=60;

// ── Helpers ─────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the limit
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

/// Validate an estimated preparation time (5..=60 minutes, 5-minute steps)
pub fn validate_estimated_time(minutes: u32) -> Result<(), AppError> {
    if !ESTIMATED_TIME_CHOICES.contains(&minutes) || minutes % 5 != 0 {
        return Err(AppError::validation(format!(
            "Estimated time must be a multiple of 5 between 5 and 60, got {minutes}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_oversized_text() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(MAX_NAME_LEN + 1), "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Chapati", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn estimated_time_choices() {
        assert!(validate_estimated_time(5).is_ok());
        assert!(validate_estimated_time(60).is_ok());
        assert!(validate_estimated_time(0).is_err());
        assert!(validate_estimated_time(7).is_err());
        assert!(validate_estimated_time(65).is_err());
    }
}
