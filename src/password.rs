//! Password Strength Scoring

use std::fmt;

/// Strength bucket shown next to the meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Empty,
    Weak,
    Fair,
    Good,
    Strong,
}

impl Strength {
    pub fn label(self) -> &'static str {
        match self {
            Strength::Empty => "",
            Strength::Weak => "Weak",
            Strength::Fair => "Fair",
            Strength::Good => "Good",
            Strength::Strong => "Strong",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Strength::Empty => "strength-empty",
            Strength::Weak => "strength-weak",
            Strength::Fair => "strength-fair",
            Strength::Good => "strength-good",
            Strength::Strong => "strength-strong",
        }
    }
}

/// Individual rules for the checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordChecks {
    pub min_length: bool,
    pub long: bool,
    pub mixed_case: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl PasswordChecks {
    pub fn of(password: &str) -> Self {
        let len = password.chars().count();
        Self {
            min_length: len >= 8,
            long: len >= 12,
            mixed_case: password.chars().any(char::is_lowercase) && password.chars().any(char::is_uppercase),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            symbol: password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        }
    }

    /// (label, passed) rows for the requirement list
    pub fn checklist(&self) -> [(&'static str, bool); 4] {
        [
            ("At least 8 characters", self.min_length),
            ("Upper and lower case letters", self.mixed_case),
            ("At least one number", self.digit),
            ("At least one symbol", self.symbol),
        ]
    }
}

/// Score 0..=4. Passwords under 8 characters never score above 1.
pub fn score(password: &str) -> u8 {
    let checks = PasswordChecks::of(password);
    let raw = [checks.min_length, checks.long, checks.mixed_case, checks.digit, checks.symbol]
        .iter()
        .filter(|passed| **passed)
        .count() as u8;
    if checks.min_length { raw.min(4) } else { raw.min(1) }
}

pub fn strength(password: &str) -> Strength {
    if password.is_empty() {
        return Strength::Empty;
    }
    match score(password) {
        0 | 1 => Strength::Weak,
        2 => Strength::Fair,
        3 => Strength::Good,
        _ => Strength::Strong,
    }
}

/// Meter fill percentage
pub fn meter_percent(password: &str) -> u8 {
    score(password) * 25
}

/// Weakest strength accepted for a new password
pub const MIN_ACCEPTED: Strength = Strength::Fair;

/// Reason a password change is blocked. `Display` is the alert text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChangeError {
    MissingCurrent,
    TooWeak,
    Mismatch,
    Unchanged,
}

impl fmt::Display for PasswordChangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            PasswordChangeError::MissingCurrent => "Please enter your current password.",
            PasswordChangeError::TooWeak => "The new password is too weak. Use at least 8 characters with mixed case, numbers or symbols.",
            PasswordChangeError::Mismatch => "The new password and its confirmation do not match.",
            PasswordChangeError::Unchanged => "The new password must be different from the current one.",
        };
        f.write_str(message)
    }
}

pub fn validate_password_change(current: &str, new: &str, confirm: &str) -> Result<(), PasswordChangeError> {
    if current.is_empty() {
        return Err(PasswordChangeError::MissingCurrent);
    }
    if strength(new) < MIN_ACCEPTED {
        return Err(PasswordChangeError::TooWeak);
    }
    if new != confirm {
        return Err(PasswordChangeError::Mismatch);
    }
    if new == current {
        return Err(PasswordChangeError::Unchanged);
    }
    Ok(())
}
