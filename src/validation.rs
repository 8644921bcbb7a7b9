//! Submission gate for the report form.

use crate::reports::ReportFields;
use regex::Regex;
use std::sync::OnceLock;

/// Shown for any failed rule; the form never says which field was wrong.
pub const VALIDATION_ERROR_MESSAGE: &str = "Please fill in all required fields correctly.";

const MIN_MESSAGE_CHARS: usize = 10;

/// Permissive single-`@` check: `local@domain.tld`, no whitespace, no extra `@`.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    });
    regex.is_match(email)
}

/// Returns true when the submission may be stored. Rules short-circuit in order:
/// name, email, subject, message.
pub fn validate(fields: &ReportFields) -> bool {
    if fields.name.trim().is_empty() {
        return false;
    }
    if !is_valid_email(&fields.email) {
        return false;
    }
    if fields.subject.is_empty() {
        return false;
    }
    let message = fields.message.trim();
    if message.is_empty() || message.chars().count() < MIN_MESSAGE_CHARS {
        return false;
    }
    true
}
