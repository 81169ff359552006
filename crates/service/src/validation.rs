//! Explicit per-input validation, run before any service logic touches the store.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of field/message pairs for one input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError { field: field.to_string(), message: message.into() });
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn errors(&self) -> &[FieldError] { &self.0 }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Required text with a char-count range; blank counts as missing.
    pub fn required_len(&mut self, field: &str, value: &str, min: usize, max: usize, label: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{label} is required"));
            return;
        }
        let n = value.chars().count();
        if n < min || n > max {
            self.add(field, format!("{label} must be between {min} and {max} characters"));
        }
    }

    pub fn max_len(&mut self, field: &str, value: Option<&str>, max: usize, label: &str) {
        if let Some(v) = value {
            if v.chars().count() > max {
                self.add(field, format!("{label} must not exceed {max} characters"));
            }
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// `local@domain.tld`, no whitespace, one `@`, dotted domain with non-empty labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else { return false };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty() && !label.starts_with('-') && !label.ends_with('-')
    })
}

/// Optional leading `+`, then 10 to 15 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("j.smith+hr@mail.example.org"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@x..com"));
    }

    #[test]
    fn phone_shapes() {
        assert!(is_valid_phone("0123456789"));
        assert!(is_valid_phone("+441234567890"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+1234567890123456"));
        assert!(!is_valid_phone("012-345-6789"));
        assert!(!is_valid_phone("++1234567890"));
    }

    #[test]
    fn required_len_reports_missing_before_length() {
        let mut errs = ValidationErrors::new();
        errs.required_len("name", "   ", 1, 100, "Name");
        assert_eq!(errs.errors()[0].message, "Name is required");

        let mut errs = ValidationErrors::new();
        errs.required_len("firstName", "A", 2, 50, "First name");
        assert_eq!(errs.errors()[0].message, "First name must be between 2 and 50 characters");
    }

    #[test]
    fn display_joins_fields() {
        let mut errs = ValidationErrors::new();
        errs.add("email", "Email must be valid");
        errs.add("hireDate", "Hire date is required");
        assert_eq!(errs.to_string(), "email: Email must be valid; hireDate: Hire date is required");
        assert!(errs.into_result().is_err());
    }
}
