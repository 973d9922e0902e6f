//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use crate::domain::{MAX_TITLE_LENGTH, TicketId};

/// Validate an administrator id.
///
/// Delegates to `commands::init` so the rules live in one place.
pub fn validate_admin_id(s: &str) -> Result<String, String> {
    use crate::commands::init;

    let trimmed = s.trim();
    init::validate_admin_id(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

/// Validate a request id: four digits between 1000 and 9999.
pub fn validate_ticket_id(s: &str) -> Result<TicketId, String> {
    TicketId::parse(s).map_err(|e| e.to_string())
}

/// Validate request title.
///
/// Title must be non-empty and at most 200 characters.
pub fn validate_title(s: &str) -> Result<String, String> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err("Title cannot be empty".to_string());
    }

    let length = trimmed.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title cannot exceed {MAX_TITLE_LENGTH} characters (got {length})"
        ));
    }

    Ok(trimmed.to_string())
}

/// Validate a user id given on the command line.
pub fn validate_user_id(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("User ID cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::valid("4821", true)]
    #[case::padded(" 1000 ", true)]
    #[case::too_low("0999", false)]
    #[case::letters("abcd", false)]
    #[case::too_long("12345", false)]
    fn ticket_id_validation(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(validate_ticket_id(input).is_ok(), ok);
    }

    #[test]
    fn title_is_trimmed() {
        assert_eq!(validate_title("  Dune  ").unwrap(), "Dune");
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    fn title_empty_rejected(#[case] input: &str) {
        assert_eq!(validate_title(input).unwrap_err(), "Title cannot be empty");
    }

    #[test]
    fn title_too_long_rejected() {
        let long = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_title(&long).unwrap_err().contains("cannot exceed"));
    }

    #[test]
    fn admin_id_validation_delegates() {
        assert_eq!(validate_admin_id(" 42 ").unwrap(), "42");
        assert!(validate_admin_id("4 2").is_err());
    }

    #[test]
    fn user_id_must_not_be_blank() {
        assert!(validate_user_id(" ").is_err());
        assert_eq!(validate_user_id("7").unwrap(), "7");
    }
}
