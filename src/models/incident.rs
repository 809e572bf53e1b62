/// Incident and dispatch records
use crate::constants::{INCIDENT_ID_PREFIX, INCIDENT_TTL_SECONDS, LOCATION_FIX_TTL_SECONDS};
use crate::models::requests::LocationInput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which messaging path carried (or would carry) an SMS.
///
/// `Domestic` is the short-code-compliant path required for in-country
/// transactional alerts; `Fallback` is the general-purpose international
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Domestic,
    Fallback,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::Fallback => "fallback",
        }
    }
}

/// How the emergency was detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionType {
    EmergencyWords,
    AbruptNoise,
    #[default]
    Generic,
}

// Unrecognized detection tags fall back to Generic rather than failing the
// whole alert.
impl<'de> Deserialize<'de> for DetectionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::parse(&tag))
    }
}

impl DetectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmergencyWords => "emergency_words",
            Self::AbruptNoise => "abrupt_noise",
            Self::Generic => "generic",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "emergency_words" => Self::EmergencyWords,
            "abrupt_noise" => Self::AbruptNoise,
            _ => Self::Generic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    Sent,
    Failed,
}

/// Outcome of a single SMS dispatch attempt.
///
/// A failed provider call is reported as `Failed` with the real error
/// detail. The only synthesized success is simulate mode, which is marked
/// explicitly with `simulated: true`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub status: DispatchStatus,
    pub transport: Transport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
    pub simulated: bool,
}

impl DispatchResult {
    pub fn sent(transport: Transport, message_id: String) -> Self {
        Self {
            status: DispatchStatus::Sent,
            transport,
            message_id: Some(message_id),
            error_detail: None,
            simulated: false,
        }
    }

    pub fn failed(transport: Transport, error_detail: String) -> Self {
        Self {
            status: DispatchStatus::Failed,
            transport,
            message_id: None,
            error_detail: Some(error_detail),
            simulated: false,
        }
    }

    pub fn simulated(transport: Transport, message_id: String) -> Self {
        Self {
            status: DispatchStatus::Sent,
            transport,
            message_id: Some(message_id),
            error_detail: None,
            simulated: true,
        }
    }

    pub fn is_sent(&self) -> bool {
        self.status == DispatchStatus::Sent
    }
}

/// Sort order for location-fix history queries, by capture time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// A single emergency-alert episode. Written once, never updated; the
/// store's TTL mechanism removes it after the retention window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub incident_id: String,
    pub victim_name: String,
    pub emergency_phone: String,
    pub country_code: String,
    pub detection_type: DetectionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_location: Option<LocationInput>,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub expires_at: i64,
}

impl Incident {
    pub fn new(
        victim_name: String,
        emergency_phone: String,
        country_code: String,
        detection_type: DetectionType,
        initial_location: Option<LocationInput>,
    ) -> Self {
        let now = Utc::now();
        Self {
            incident_id: generate_incident_id(),
            victim_name,
            emergency_phone,
            country_code,
            detection_type,
            initial_location,
            created_at: now,
            status: "active".to_string(),
            expires_at: now.timestamp() + INCIDENT_TTL_SECONDS,
        }
    }
}

/// Generates an incident ID of the form `EMG-` + 8 uppercase hex chars.
pub fn generate_incident_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}-{}", INCIDENT_ID_PREFIX, hex[..8].to_uppercase())
}

/// One GPS sample for an incident. Append-only, keyed by
/// `(incident_id, captured_at_ms)`, expired by the store after 24 hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFix {
    pub incident_id: String,
    pub captured_at_ms: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<i32>,
    pub expires_at: i64,
}

impl LocationFix {
    /// Builds a fix captured now from request-level location data.
    pub fn captured_now(
        incident_id: String,
        latitude: f64,
        longitude: f64,
        accuracy: f64,
        speed: Option<f64>,
        heading: Option<f64>,
        battery_level: Option<i32>,
    ) -> Self {
        let now = Utc::now();
        Self {
            incident_id,
            captured_at_ms: now.timestamp_millis(),
            latitude,
            longitude,
            accuracy,
            speed,
            heading,
            battery_level,
            expires_at: now.timestamp() + LOCATION_FIX_TTL_SECONDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_incident_id_shape() {
        let id = generate_incident_id();
        assert!(id.starts_with("EMG-"));
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, id.to_uppercase());
        assert_ne!(id, generate_incident_id());
    }

    #[test]
    fn test_detection_type_round_trip() {
        assert_eq!(
            DetectionType::parse("emergency_words"),
            DetectionType::EmergencyWords
        );
        assert_eq!(DetectionType::parse("abrupt_noise"), DetectionType::AbruptNoise);
        assert_eq!(DetectionType::parse("anything_else"), DetectionType::Generic);
        assert_eq!(DetectionType::EmergencyWords.as_str(), "emergency_words");
    }

    #[test]
    fn test_detection_type_deserializes_unknown_as_generic() {
        let parsed: DetectionType = serde_json::from_str("\"emergency\"").unwrap();
        assert_eq!(parsed, DetectionType::Generic);
    }

    #[test]
    fn test_dispatch_result_serialization() {
        let sent = DispatchResult::sent(Transport::Domestic, "m-1".to_string());
        let json = serde_json::to_value(&sent).unwrap();
        assert_eq!(json["status"], "sent");
        assert_eq!(json["transport"], "domestic");
        assert_eq!(json["messageId"], "m-1");
        assert_eq!(json["simulated"], false);

        let failed = DispatchResult::failed(Transport::Fallback, "boom".to_string());
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["errorDetail"], "boom");
        assert!(json.get("messageId").is_none());
    }

    #[test]
    fn test_incident_retention_window() {
        let incident = Incident::new(
            "Alice".to_string(),
            "+13053033060".to_string(),
            "+1".to_string(),
            DetectionType::EmergencyWords,
            None,
        );
        let window = incident.expires_at - incident.created_at.timestamp();
        assert_eq!(window, 7 * 24 * 60 * 60);
        assert_eq!(incident.status, "active");
    }
}
