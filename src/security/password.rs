//! Password Policy
//!
//! Strict boundary check: a password must already consist solely of safe
//! characters. If sanitization changes its length, the original contained
//! something we would have silently stripped, and that is a failure
//! rather than a cleanup.

use crate::security::sanitize::sanitize;

const MIN_LEN: usize = 6;
const MAX_LEN: usize = 128;

/// Validate a password, returning every failed rule.
pub fn validate_password(password: &str) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if password.is_empty() {
        errors.push("Password is required".to_string());
        return Err(errors);
    }

    match sanitize(password) {
        Err(_) => {
            errors.push("Password contains disallowed characters or commands".to_string());
        }
        Ok(cleaned) => {
            let len = cleaned.chars().count();
            if len < MIN_LEN {
                errors.push(format!("Password must be at least {MIN_LEN} characters"));
            }
            if len > MAX_LEN {
                errors.push(format!("Password is too long (maximum {MAX_LEN} characters)"));
            }
            if len != password.chars().count() {
                errors.push("Password contains characters that are not allowed".to_string());
            }
        }
    }

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
    fn test_length_bounds() {
        assert!(validate_password("abc123").is_ok()); // 6
        assert!(validate_password(&"a".repeat(128)).is_ok()); // 128
        assert!(validate_password("abc12").is_err()); // 5
        assert!(validate_password(&"a".repeat(129)).is_err()); // 129
    }

    #[test]
    fn test_empty_password_fails() {
        let errors = validate_password("").unwrap_err();
        assert_eq!(errors, vec!["Password is required".to_string()]);
    }

    #[test]
    fn test_injection_marker_fails() {
        let errors = validate_password("pass'word").unwrap_err();
        assert!(errors[0].contains("disallowed"));
    }

    #[test]
    fn test_stripped_characters_fail_strict_policy() {
        // Control character would be removed by sanitization, so the
        // cleaned length differs from the original.
        let errors = validate_password("abc\x01def").unwrap_err();
        assert!(errors.iter().any(|e| e.contains("not allowed")));

        // Leading whitespace is trimmed, same strict rule.
        assert!(validate_password(" abcdef").is_err());
    }

    #[test]
    fn test_ordinary_passwords_pass() {
        assert!(validate_password("abc123xyz").is_ok());
        assert!(validate_password("s3nh4-f0rte_2024").is_ok());
    }
}
