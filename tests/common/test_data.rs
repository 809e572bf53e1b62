/// Test data builders shared across integration tests
use super::fakes::{FailingSender, FailingStore, RecordingSender};
use alertflow::models::Transport;
use alertflow::services::{AlertConfig, AppContext, InMemoryIncidentStore, IncidentStore, SmsSender};
use std::sync::Arc;

pub fn test_config() -> AlertConfig {
    AlertConfig {
        incident_table: "test-incidents".to_string(),
        location_table: "test-location-fixes".to_string(),
        origination_number: "+12175550142".to_string(),
        sender_id: Some("ALERTFLOW".to_string()),
        configuration_set: None,
        tracking_url_base: Some("https://track.example.com/live".to_string()),
        simulate: false,
    }
}

/// A context with recording senders and an in-memory store. Returns the
/// senders too so tests can assert on captured sends.
pub fn recording_context() -> (Arc<AppContext>, RecordingSender, RecordingSender) {
    let domestic = RecordingSender::new(Transport::Domestic);
    let fallback = RecordingSender::new(Transport::Fallback);
    let ctx = AppContext::with_parts(
        test_config(),
        Arc::new(domestic.clone()),
        Arc::new(fallback.clone()),
        Arc::new(InMemoryIncidentStore::new()),
    );
    (Arc::new(ctx), domestic, fallback)
}

/// A context whose providers reject every send.
pub fn failing_sender_context() -> Arc<AppContext> {
    Arc::new(AppContext::with_parts(
        test_config(),
        Arc::new(FailingSender::new(Transport::Domestic, "provider throttled")),
        Arc::new(FailingSender::new(Transport::Fallback, "provider throttled")),
        Arc::new(InMemoryIncidentStore::new()),
    ))
}

/// A context whose store fails but whose senders work.
pub fn failing_store_context() -> (Arc<AppContext>, RecordingSender) {
    let domestic = RecordingSender::new(Transport::Domestic);
    let ctx = AppContext::with_parts(
        test_config(),
        Arc::new(domestic.clone()),
        Arc::new(RecordingSender::new(Transport::Fallback)),
        Arc::new(FailingStore),
    );
    (Arc::new(ctx), domestic)
}

/// A recording context with a caller-supplied store, for seeding data.
pub fn context_with_store(store: Arc<dyn IncidentStore>) -> Arc<AppContext> {
    let domestic: Arc<dyn SmsSender> = Arc::new(RecordingSender::new(Transport::Domestic));
    let fallback: Arc<dyn SmsSender> = Arc::new(RecordingSender::new(Transport::Fallback));
    Arc::new(AppContext::with_parts(test_config(), domestic, fallback, store))
}

pub fn emergency_alert_payload(phone: &str) -> serde_json::Value {
    serde_json::json!({
        "action": "JURY_EMERGENCY_ALERT",
        "victimName": "Maria Garcia",
        "phoneNumber": phone,
        "detectionType": "emergency_words",
        "detectionData": {
            "detectedWords": ["help"],
            "confidence": 0.87
        },
        "location": {
            "latitude": 25.7617,
            "longitude": -80.1918,
            "accuracy": 10.0,
            "placeName": "Bayfront Park"
        }
    })
}
