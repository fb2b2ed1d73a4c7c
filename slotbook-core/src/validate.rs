//! Field validators for the contact form.
//!
//! These are pure predicates. The per-field error flag and help text live in
//! [`crate::contact`].

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid name pattern"));

static CONTACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid contact pattern"));

/// `local@domain.tld`, where every part is at least one character that is
/// neither whitespace nor `@`.
pub fn validate_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Letters and whitespace only, and not blank.
pub fn validate_name(value: &str) -> bool {
    !value.trim().is_empty() && NAME_RE.is_match(value)
}

/// Exactly ten ASCII digits.
pub fn validate_contact(value: &str) -> bool {
    CONTACT_RE.is_match(value)
}
