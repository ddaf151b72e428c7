//! Contact identifier classification.
//!
//! A single free-form "email or phone" field is accepted by the password
//! reset flow; [`classify`] decides which lookup it maps to.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{9,15}$").expect("valid phone regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    Email(String),
    Phone(String),
    Invalid,
}

/// Classify `raw` as an email address or phone number.
///
/// Surrounding whitespace is ignored. Email is tested first.
pub fn classify(raw: &str) -> Contact {
    let value = raw.trim();
    if EMAIL_RE.is_match(value) {
        Contact::Email(value.to_owned())
    } else if PHONE_RE.is_match(value) {
        Contact::Phone(value.to_owned())
    } else {
        Contact::Invalid
    }
}

pub fn is_phone(raw: &str) -> bool {
    PHONE_RE.is_match(raw)
}

/// True when [`classify`] would resolve `raw` to [`Contact::Email`].
pub fn is_email(raw: &str) -> bool {
    matches!(classify(raw), Contact::Email(_))
}
