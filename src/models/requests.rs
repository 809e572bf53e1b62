/// Inbound request payloads
///
/// The `action` field is a closed enum: an unknown action fails
/// deserialization and is rejected at the boundary instead of falling
/// through to a default handler.
use crate::models::incident::{DetectionType, SortOrder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action")]
pub enum ActionRequest {
    #[serde(rename = "JURY_EMERGENCY_ALERT")]
    EmergencyAlert(EmergencyAlertRequest),
    #[serde(rename = "JURY_TEST")]
    JuryTest(JuryTestRequest),
    #[serde(rename = "TEST_SMS")]
    TestSms(TestSmsRequest),
    #[serde(rename = "ANALYZE_AUDIO")]
    AnalyzeAudio(AnalyzeAudioRequest),
    #[serde(rename = "UPDATE_LOCATION")]
    UpdateLocation(UpdateLocationRequest),
    #[serde(rename = "GET_LOCATION")]
    GetLocation(LocationQueryRequest),
    #[serde(rename = "GET_LOCATION_HISTORY")]
    GetLocationHistory(LocationHistoryRequest),
    #[serde(rename = "CHECK_CONFIG")]
    CheckConfig,
}

impl ActionRequest {
    /// Action tag for logging.
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::EmergencyAlert(_) => "JURY_EMERGENCY_ALERT",
            Self::JuryTest(_) => "JURY_TEST",
            Self::TestSms(_) => "TEST_SMS",
            Self::AnalyzeAudio(_) => "ANALYZE_AUDIO",
            Self::UpdateLocation(_) => "UPDATE_LOCATION",
            Self::GetLocation(_) => "GET_LOCATION",
            Self::GetLocationHistory(_) => "GET_LOCATION_HISTORY",
            Self::CheckConfig => "CHECK_CONFIG",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlertRequest {
    #[serde(default = "default_victim_name")]
    pub victim_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub detection_type: DetectionType,
    #[serde(default)]
    pub detection_data: DetectionData,
    #[serde(default)]
    pub location: LocationInput,
}

fn default_victim_name() -> String {
    "Unknown Person".to_string()
}

/// An emergency contact from the caller's profile. Only opted-in contacts
/// are ever messaged.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub opted_in: bool,
}

/// Detection-specific payload accompanying an alert.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionData {
    #[serde(default)]
    pub detected_words: Vec<String>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_link: Option<String>,
}

impl LocationInput {
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JuryTestRequest {
    #[serde(default = "default_test_user")]
    pub victim_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

fn default_test_user() -> String {
    "Test User".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSmsRequest {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeAudioRequest {
    #[serde(default)]
    pub audio_data: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    #[serde(default)]
    pub incident_id: Option<String>,
    #[serde(default)]
    pub location: LocationInput,
    #[serde(default)]
    pub battery_level: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationQueryRequest {
    #[serde(default)]
    pub incident_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationHistoryRequest {
    #[serde(default)]
    pub incident_id: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub order: Option<SortOrder>,
}
