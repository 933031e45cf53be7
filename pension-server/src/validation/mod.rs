//! Input validation
//!
//! Every validator collects all violated rules into a `Vec<FieldError>`
//! instead of stopping at the first one. Field names match the JSON
//! payload (camelCase). Date-dependent rules take `today` explicitly.

pub mod contribution;
pub mod employer;
pub mod member;

use shared::error::FieldError;
use shared::pagination::MAX_PAGE_SIZE;
use std::sync::LazyLock;
use validator::ValidateEmail;

// ── Text length limits ──────────────────────────────────────────────

/// First and last names
pub const MAX_NAME_LEN: usize = 50;

/// Company names
pub const MAX_COMPANY_NAME_LEN: usize = 200;

/// Validation notes, addresses
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: RC number
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// E.164: optional plus, no leading zero, 2 to 15 digits
static PHONE_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^\+?[1-9]\d{1,14}$").expect("phone pattern is a valid regex")
});

// ── Rule helpers ────────────────────────────────────────────────────

/// Required text: non-blank and within `max_len` characters.
pub fn required_text(
    errors: &mut Vec<FieldError>,
    value: &str,
    field: &str,
    label: &str,
    max_len: usize,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
    }
    optional_text(errors, Some(value), field, label, max_len);
}

/// Optional text: only the length limit applies.
pub fn optional_text(
    errors: &mut Vec<FieldError>,
    value: Option<&str>,
    field: &str,
    label: &str,
    max_len: usize,
) {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        errors.push(FieldError::new(
            field,
            format!("{label} must not exceed {max_len} characters"),
        ));
    }
}

pub fn email(errors: &mut Vec<FieldError>, value: &str, field: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "Email is required"));
        return;
    }
    if value.len() > MAX_EMAIL_LEN {
        errors.push(FieldError::new(
            field,
            format!("Email must not exceed {MAX_EMAIL_LEN} characters"),
        ));
    }
    if !value.validate_email() {
        errors.push(FieldError::new(field, "Email must be valid"));
    }
}

pub fn phone(errors: &mut Vec<FieldError>, value: &str, field: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "Phone number is required"));
        return;
    }
    if !PHONE_RE.is_match(value) {
        errors.push(FieldError::new(field, "Phone number is invalid"));
    }
}

/// Page request bounds shared by every search endpoint.
pub fn page(errors: &mut Vec<FieldError>, page_number: i64, page_size: i64) {
    if page_number <= 0 {
        errors.push(FieldError::new(
            "pageNumber",
            "Page number must be greater than 0",
        ));
    }
    if page_size <= 0 || page_size > MAX_PAGE_SIZE {
        errors.push(FieldError::new(
            "pageSize",
            format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
        ));
    }
}

/// Turn a collected list into a result.
pub fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_reports_blank_and_length() {
        let mut errors = Vec::new();
        required_text(&mut errors, "   ", "firstName", "First name", MAX_NAME_LEN);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "firstName");

        let mut errors = Vec::new();
        let long = "a".repeat(MAX_NAME_LEN + 1);
        required_text(&mut errors, &long, "lastName", "Last name", MAX_NAME_LEN);
        assert_eq!(errors[0].message, "Last name must not exceed 50 characters");

        let mut errors = Vec::new();
        required_text(&mut errors, &"a".repeat(MAX_NAME_LEN), "lastName", "Last name", MAX_NAME_LEN);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_email_rules() {
        let mut errors = Vec::new();
        email(&mut errors, "ada@example.com", "email");
        assert!(errors.is_empty());

        email(&mut errors, "not-an-email", "email");
        assert_eq!(errors.len(), 1);

        let mut errors = Vec::new();
        email(&mut errors, "", "email");
        assert_eq!(errors[0].message, "Email is required");
    }

    #[test]
    fn test_phone_rules() {
        for ok in ["+2348012345678", "8012345678", "12"] {
            let mut errors = Vec::new();
            phone(&mut errors, ok, "phoneNumber");
            assert!(errors.is_empty(), "{ok} should be accepted");
        }
        for bad in ["08012345678", "+1234567890123456", "12a45", "1"] {
            let mut errors = Vec::new();
            phone(&mut errors, bad, "phoneNumber");
            assert_eq!(errors.len(), 1, "{bad} should be rejected");
        }
    }

    #[test]
    fn test_page_rules() {
        let mut errors = Vec::new();
        page(&mut errors, 1, 100);
        assert!(errors.is_empty());

        page(&mut errors, 0, 101);
        assert_eq!(errors.len(), 2);

        let mut errors = Vec::new();
        page(&mut errors, 1, 0);
        assert_eq!(errors[0].field, "pageSize");
    }
}
