/// Application constants
///
/// This module contains all hardcoded values used throughout the application.
/// Constants are organized by category for easy maintenance.
// ============================================================================
// Identity Constants
// ============================================================================
/// Source identifier for all messages originating from this system
pub const SOURCE_NAME: &str = "alertflow";

/// Prefix for generated incident IDs (e.g. EMG-4F2A91BC)
pub const INCIDENT_ID_PREFIX: &str = "EMG";

/// Signature line appended to every composed SMS
pub const SMS_SIGNATURE: &str = "Alertflow Guardian";

/// Prefix for message IDs synthesized in simulate mode
pub const SIMULATED_MESSAGE_ID_PREFIX: &str = "sim";

// ============================================================================
// SMS Limits
// ============================================================================

/// Maximum characters per SMS before the short template is used
pub const MAX_SMS_CHARS: usize = 160;

// ============================================================================
// Retention
// ============================================================================

/// Incident record TTL in seconds (7 days)
pub const INCIDENT_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Location fix TTL in seconds (24 hours)
pub const LOCATION_FIX_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Default number of fixes returned by a history query
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Hard cap on fixes returned by a history query
pub const MAX_HISTORY_LIMIT: usize = 1000;

// ============================================================================
// Retry Configuration (storage calls only; SMS sends are never retried)
// ============================================================================

/// Maximum number of retries for transient storage failures
pub const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff in milliseconds
pub const RETRY_BASE_DELAY_MS: u64 = 200;

/// Maximum delay for exponential backoff in milliseconds
pub const RETRY_MAX_DELAY_MS: u64 = 2000;

/// Jitter factor for retry delays (0.0 to 1.0)
pub const RETRY_JITTER_FACTOR: f64 = 0.1;

// ============================================================================
// Networking
// ============================================================================

/// Explicit operation timeout applied to every outbound AWS call
pub const AWS_OPERATION_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// Distress Classification
// ============================================================================

/// Keywords whose presence in a transcript marks it as distress
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "HELP",
    "EMERGENCY",
    "DANGER",
    "911",
    "POLICE",
    "FIRE",
    "AMBULANCE",
];

/// Confidence reported when at least one emergency keyword matched
pub const KEYWORD_MATCH_CONFIDENCE: f64 = 0.87;

/// Confidence reported when no emergency indicator was found
pub const NO_MATCH_CONFIDENCE: f64 = 0.1;

// ============================================================================
// Validation Constants
// ============================================================================

/// E.164 validation: `+`, a 1-3 digit country code, a 4-14 digit number
pub const PHONE_REGEX_PATTERN: &str = r"^\+\d{1,3}\d{4,14}$";

// ============================================================================
// Testing Constants
// ============================================================================

#[cfg(test)]
pub mod test_constants {
    /// Test incident table name
    pub const TEST_INCIDENT_TABLE: &str = "test-incidents";

    /// Test location table name
    pub const TEST_LOCATION_TABLE: &str = "test-location-fixes";

    /// Test origination number (US 10DLC)
    pub const TEST_ORIGINATION_NUMBER: &str = "+12175550142";
}
