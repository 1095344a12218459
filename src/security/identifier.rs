//! Identifier Classification
//!
//! Users log in with either an email address or an institutional
//! registration number (RA). After sanitization an identifier is exactly
//! one of the two; anything else is invalid.

use crate::security::sanitize::sanitize;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // RFC-5322-lite; strict parsing belongs to the upstream provider.
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// A sanitized, classified login identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Email(String),
    /// Registration number, normalized to bare digits.
    Ra(String),
}

impl Identifier {
    pub fn value(&self) -> &str {
        match self {
            Identifier::Email(v) | Identifier::Ra(v) => v,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Identifier::Email(_) => "email",
            Identifier::Ra(_) => "ra",
        }
    }
}

/// Sanitize and classify a login identifier.
///
/// Presence of `@` selects the email branch (max length 254); otherwise
/// the value must reduce to 6-12 digits once hyphens, dots, and spaces are
/// stripped. Returns `None` for malicious or malformed input.
pub fn classify_identifier(input: &str) -> Option<Identifier> {
    if input.is_empty() {
        return None;
    }

    let cleaned = sanitize(input).ok()?;

    if cleaned.contains('@') {
        if is_valid_email(&cleaned) {
            return Some(Identifier::Email(cleaned));
        }
        return None;
    }

    let digits: String = cleaned
        .chars()
        .filter(|c| !matches!(c, '-' | '.' | ' '))
        .collect();

    if (6..=12).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        return Some(Identifier::Ra(digits));
    }

    None
}

fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_classified() {
        let id = classify_identifier("maria.silva@example.com").unwrap();
        assert_eq!(id.kind(), "email");
        assert_eq!(id.value(), "maria.silva@example.com");
    }

    #[test]
    fn test_malformed_email_rejected() {
        assert!(classify_identifier("not-an-email@").is_none());
        assert!(classify_identifier("@example.com").is_none());
        assert!(classify_identifier("a@b").is_none());
    }

    #[test]
    fn test_overlong_email_rejected() {
        let local = "a".repeat(250);
        let email = format!("{local}@example.com");
        assert!(classify_identifier(&email).is_none());
    }

    #[test]
    fn test_ra_classified_and_normalized() {
        let id = classify_identifier("449.840-234 95").unwrap();
        assert_eq!(id.kind(), "ra");
        assert_eq!(id.value(), "44984023495");

        let id = classify_identifier("44984023495").unwrap();
        assert_eq!(id, Identifier::Ra("44984023495".to_string()));
    }

    #[test]
    fn test_ra_length_bounds() {
        assert!(classify_identifier("123456").is_some()); // 6 digits
        assert!(classify_identifier("123456789012").is_some()); // 12 digits
        assert!(classify_identifier("12345").is_none()); // 5 digits
        assert!(classify_identifier("1234567890123").is_none()); // 13 digits
    }

    #[test]
    fn test_non_numeric_ra_rejected() {
        assert!(classify_identifier("12345a").is_none());
        assert!(classify_identifier("abcdef").is_none());
    }

    #[test]
    fn test_malicious_identifier_rejected() {
        assert!(classify_identifier("' OR 1=1 --").is_none());
        assert!(classify_identifier("").is_none());
    }
}
