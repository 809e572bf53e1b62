/// Phone number normalization and validation
use crate::constants::PHONE_REGEX_PATTERN;
use crate::error::AlertflowError;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static E164_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_REGEX_PATTERN).unwrap());

/// A normalized E.164 phone number: a leading `+` followed only by digits.
///
/// Construction goes through [`PhoneNumber::parse`], which strips common
/// formatting characters and fails closed on anything that still is not a
/// plausible E.164 number. A destination rejected here never reaches the
/// dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalizes raw user input and validates it.
    ///
    /// Spaces, dashes, dots, and parentheses are removed and a missing
    /// leading `+` is prepended. The result must match
    /// `+<1-3 digit country code><4-14 digit number>`.
    pub fn parse(raw: &str) -> Result<Self, AlertflowError> {
        let stripped: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();

        let candidate = if stripped.starts_with('+') {
            stripped
        } else {
            format!("+{stripped}")
        };

        if E164_PATTERN.is_match(&candidate) {
            Ok(Self(candidate))
        } else {
            Err(AlertflowError::InvalidPhoneNumber(format!(
                "'{}' is not a valid E.164 number (+<country code><number>)",
                raw
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
