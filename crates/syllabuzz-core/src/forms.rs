//! Local validation for the signup and password-reset forms.
//!
//! Runs before anything is sent, so obviously bad input never reaches the
//! backend. Errors are keyed by field so a form can show them inline.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Scores below this are rejected.
pub const MIN_PASSWORD_STRENGTH: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordStrength(u8);

impl PasswordStrength {
    /// One point each for length of eight or more, an uppercase letter, a
    /// digit and a character that is neither letter nor digit.
    pub fn of(password: &str) -> Self {
        let checks = [
            password.chars().count() >= 8,
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ];
        Self(checks.iter().filter(|passed| **passed).count() as u8)
    }

    pub fn score(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "Weak",
            1 => "Fair",
            2 => "Good",
            3 => "Strong",
            _ => "Very strong",
        }
    }

    pub fn is_too_weak(self) -> bool {
        self.0 < MIN_PASSWORD_STRENGTH
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/4)", self.label(), self.0)
    }
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_PATTERN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));
    EMAIL_PATTERN.is_match(email)
}

/// Field name to message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: &'static str, message: &str) {
        self.0.insert(field, message.to_string());
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agreed_to_terms: bool,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.insert("name", "Name is required");
        }

        if self.email.is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Email is invalid");
        }

        check_password(&mut errors, &self.password, &self.confirm_password);

        if !self.agreed_to_terms {
            errors.insert("terms", "You must agree to the terms and conditions");
        }

        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_password(&mut errors, &self.password, &self.confirm_password);
        errors.into_result()
    }
}

fn check_password(errors: &mut FieldErrors, password: &str, confirm: &str) {
    if password.is_empty() {
        errors.insert("password", "Password is required");
    } else if PasswordStrength::of(password).is_too_weak() {
        errors.insert("password", "Password is too weak");
    }

    if password != confirm {
        errors.insert("confirm_password", "Passwords do not match");
    }
}
