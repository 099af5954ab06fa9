//! Field-level validation helpers for request bodies.

use std::collections::BTreeMap;
use std::fmt;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const PASSWORD_MIN_LENGTH: usize = 8;

const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "password123", "12345678", "123456789", "1234567890",
    "qwerty123", "qwertyuiop", "iloveyou", "sunshine", "princess", "football",
    "baseball", "welcome1", "letmein1", "abc12345", "trustno1", "passw0rd",
    "superman", "starwars", "whatever", "dragon123", "monkey123", "admin123",
];

/// Collected validation messages keyed by field name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// Returns `Err(self)` when any message was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "{}", fields.join(", "))
    }
}

/// Checks a string's character count against an upper bound.
pub fn check_max_length(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(
            field,
            format!("Ensure this field has no more than {} characters.", max),
        );
    }
}

/// Minimal structural email check: one `@`, a non-empty local part and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|part| !part.is_empty())
}

/// Password strength rules applied at registration.
///
/// `attributes` pairs a user attribute name with its value; the password may not be
/// too similar to any of them.
pub fn check_password_strength(
    errors: &mut FieldErrors,
    password: &str,
    attributes: &[(&str, &str)],
) {
    let lowered = password.to_lowercase();

    for (name, value) in attributes {
        if is_too_similar(&lowered, value) {
            errors.add("password", format!("The password is too similar to the {}.", name));
        }
    }

    if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.add(
            "password",
            format!(
                "This password is too short. It must contain at least {} characters.",
                PASSWORD_MIN_LENGTH
            ),
        );
    }

    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        errors.add("password", "This password is too common.");
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        errors.add("password", "This password is entirely numeric.");
    }
}

fn is_too_similar(password: &str, attribute: &str) -> bool {
    let attribute = attribute.to_lowercase();

    // Emails are compared by their local part as well as in full.
    let candidates = match attribute.split_once('@') {
        Some((local, _)) => vec![attribute.clone(), local.to_string()],
        None => vec![attribute.clone()],
    };

    !password.is_empty()
        && candidates
            .iter()
            .filter(|candidate| candidate.chars().count() >= 3)
            .any(|candidate| {
                password.contains(candidate.as_str()) || candidate.contains(password)
            })
}
