/// Outbound response payloads
use crate::models::incident::{DispatchResult, DispatchStatus, Transport};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Overall request outcome. `Partial` means some but not all recipients
/// were reached; `Error` is reserved for request-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Partial,
    Failed,
    Error,
}

/// Per-contact dispatch outcome included in multi-recipient responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDispatchReport {
    pub name: String,
    pub phone: String,
    #[serde(flatten)]
    pub result: DispatchResult,
}

/// Response body for alert-style actions.
///
/// `sms_error` is always serialized (null on success) so callers can rely
/// on its presence; purely informational fields are omitted when unset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victim_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_number: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_status: Option<DispatchStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_method: Option<Transport>,
    pub sms_error: Option<String>,
    /// True only when simulate mode synthesized the send
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub simulated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_warning: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contact_results: Vec<ContactDispatchReport>,
    pub timestamp: DateTime<Utc>,
}

impl AlertResponse {
    pub fn new(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            incident_id: None,
            victim_name: None,
            country: None,
            language: None,
            emergency_number: None,
            tracking_url: None,
            sms_message_id: None,
            sms_status: None,
            sms_method: None,
            sms_error: None,
            simulated: false,
            store_warning: None,
            contact_results: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Copies the dispatch outcome into the top-level sms fields.
    pub fn with_dispatch(mut self, result: &DispatchResult) -> Self {
        self.sms_message_id = result.message_id.clone();
        self.sms_status = Some(result.status);
        self.sms_method = Some(result.transport);
        self.sms_error = result.error_detail.clone();
        self.simulated = result.simulated;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sms_error_always_present() {
        let response = AlertResponse::new(ResponseStatus::Success, "ok")
            .with_dispatch(&DispatchResult::sent(Transport::Domestic, "m-1".to_string()));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["smsError"], serde_json::Value::Null);
        assert_eq!(json["smsStatus"], "sent");
        assert_eq!(json["smsMethod"], "domestic");
        assert!(json.get("contactResults").is_none());
    }

    #[test]
    fn test_failed_dispatch_surfaces_error() {
        let response = AlertResponse::new(ResponseStatus::Failed, "alert not delivered")
            .with_dispatch(&DispatchResult::failed(
                Transport::Fallback,
                "throttled".to_string(),
            ));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["smsStatus"], "failed");
        assert_eq!(json["smsError"], "throttled");
        assert!(json.get("smsMessageId").is_none());
    }
}
