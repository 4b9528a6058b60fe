//! Form validation mirroring the backend's account rules.
//!
//! The backend re-validates everything; these checks only let the forms
//! show errors before a round trip.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::sync::LazyLock;

use regex::Regex;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^\+224[0-9]{9}$";
const PHONE_PREFIX: &str = "224";
const PHONE_LOCAL_DIGITS: usize = 9;

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());
static PHONE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(PHONE_PATTERN).ok());

/// `Err` carries the message shown under the field.
pub type Validation = Result<(), String>;

fn invalid(message: &str) -> Validation {
    Err(message.to_owned())
}

/// Email is optional; when present it must look like `local@domain.tld`.
pub fn validate_email(value: &str) -> Validation {
    if value.is_empty() {
        return Ok(());
    }
    if EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value)) {
        Ok(())
    } else {
        invalid("Please enter a valid email address")
    }
}

/// Phone is optional; when present it must be `+224` and nine digits.
pub fn validate_phone(value: &str) -> Validation {
    if value.is_empty() {
        return Ok(());
    }
    if PHONE_RE.as_ref().is_some_and(|re| re.is_match(value)) {
        Ok(())
    } else {
        invalid("Phone must be in format: +224XXXXXXXXX (9 digits after +224)")
    }
}

pub fn validate_password(value: &str) -> Validation {
    if value.is_empty() {
        return invalid("Password is required");
    }
    if value.chars().count() < 8 {
        return invalid("Password must be at least 8 characters");
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return invalid("Password must contain at least one uppercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return invalid("Password must contain at least one lowercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return invalid("Password must contain at least one number");
    }
    Ok(())
}

pub fn validate_password_match(password: &str, confirm: &str) -> Validation {
    if confirm.is_empty() {
        return invalid("Please confirm your password");
    }
    if password != confirm {
        return invalid("Passwords do not match");
    }
    Ok(())
}

pub fn validate_at_least_one_contact(email: &str, phone: &str) -> Validation {
    if email.is_empty() && phone.is_empty() {
        return invalid("Please provide at least an email or phone number");
    }
    Ok(())
}

pub fn validate_required(value: &str, field_name: &str) -> Validation {
    if value.trim().is_empty() {
        return Err(format!("{field_name} is required"));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrengthLevel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Strong => "strong",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordStrength {
    /// 0 to 100.
    pub score: u8,
    pub level: StrengthLevel,
    pub feedback: Vec<&'static str>,
}

/// Score a password for the strength meter.
#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength { score: 0, level: StrengthLevel::Weak, feedback: vec!["Password is required"] };
    }

    let len = password.chars().count();
    let mut score = 0u8;
    let mut feedback = Vec::new();

    if len >= 8 {
        score += 20;
    } else {
        feedback.push("Use at least 8 characters");
    }
    if len >= 12 {
        score += 10;
    }
    if len >= 16 {
        score += 10;
    }

    let checks: [(fn(&char) -> bool, &str); 3] = [
        (char::is_ascii_lowercase, "Add lowercase letters"),
        (char::is_ascii_uppercase, "Add uppercase letters"),
        (char::is_ascii_digit, "Add numbers"),
    ];
    for (present, hint) in checks {
        if password.chars().any(|c| present(&c)) {
            score += 15;
        } else {
            feedback.push(hint);
        }
    }

    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 15;
        feedback.push("Great! You used special characters");
    } else {
        feedback.push("Consider adding special characters (!@#$%)");
    }

    let level = match score {
        0..40 => StrengthLevel::Weak,
        40..60 => StrengthLevel::Fair,
        60..80 => StrengthLevel::Good,
        _ => StrengthLevel::Strong,
    };
    PasswordStrength { score, level, feedback }
}

/// Normalize phone input while typing: keep digits and force the `+224`
/// prefix, capped at nine local digits.
#[must_use]
pub fn format_phone_number(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return value.to_owned();
    }
    let local: String = match digits.strip_prefix(PHONE_PREFIX) {
        Some(rest) => rest.chars().take(PHONE_LOCAL_DIGITS).collect(),
        None => digits.chars().take(PHONE_LOCAL_DIGITS).collect(),
    };
    format!("+{PHONE_PREFIX}{local}")
}

/// Trimmed copy of a form field.
#[must_use]
pub fn trimmed(value: &str) -> String {
    value.trim().to_owned()
}
