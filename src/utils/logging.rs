/// Logging utilities for PII redaction
///
/// Destination numbers identify real people in distress. Log lines keep
/// just enough of a number to correlate events without exposing it.
use regex::Regex;
use std::sync::LazyLock;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\d{6,18}").unwrap());

/// Redacts a single phone number, preserving the country code and the last
/// two digits.
///
/// # Examples
/// ```
/// use alertflow::utils::logging::redact_phone;
///
/// assert_eq!(redact_phone("+13053033060"), "+13***60");
/// ```
pub fn redact_phone(phone: &str) -> String {
    const VISIBLE_PREFIX: usize = 3;
    const VISIBLE_SUFFIX: usize = 2;

    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= VISIBLE_PREFIX + VISIBLE_SUFFIX {
        return "***".to_string();
    }
    let prefix: String = chars[..VISIBLE_PREFIX].iter().collect();
    let suffix: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
    format!("{prefix}***{suffix}")
}

/// Redacts every phone number embedded in free text, e.g. provider error
/// messages that echo the destination back.
pub fn redact_phones(text: &str) -> String {
    PHONE_PATTERN
        .replace_all(text, |caps: &regex::Captures| redact_phone(&caps[0]))
        .to_string()
}

/// Redacts message body for logging (shows length only)
pub fn redact_body(body: &str) -> String {
    format!("[{} chars]", body.chars().count())
}
