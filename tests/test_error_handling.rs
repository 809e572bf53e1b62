/// Error handling and simulate-mode integration tests
#[path = "common/mod.rs"]
mod common;

use alertflow::error::AlertflowError;
use alertflow::handler;
use alertflow::models::Transport;
use alertflow::services::{AppContext, Dispatcher, InMemoryIncidentStore};
use alertflow::routing::{select_profile, PhoneNumber};
use common::fakes::FailingSender;
use common::test_data::{emergency_alert_payload, test_config};
use common::{post_request, response_json};
use std::sync::Arc;

#[tokio::test]
async fn test_dispatcher_never_fabricates_success() {
    let config = test_config();
    let dispatcher = Dispatcher::new(
        Arc::new(FailingSender::new(Transport::Domestic, "number blocked")),
        Arc::new(FailingSender::new(Transport::Fallback, "number blocked")),
        &config,
    );

    let phone = PhoneNumber::parse("+13053033060").unwrap();
    let result = dispatcher
        .dispatch(&phone, "alert body", select_profile(&phone))
        .await;

    assert!(!result.is_sent());
    assert!(result.message_id.is_none());
    assert!(result.error_detail.as_deref().unwrap().contains("number blocked"));
}

#[tokio::test]
async fn test_simulate_mode_short_circuits_failing_providers() {
    let mut config = test_config();
    config.simulate = true;

    // Providers that would fail are never reached in simulate mode
    let ctx = Arc::new(AppContext::with_parts(
        config,
        Arc::new(FailingSender::new(Transport::Domestic, "unreachable")),
        Arc::new(FailingSender::new(Transport::Fallback, "unreachable")),
        Arc::new(InMemoryIncidentStore::new()),
    ));

    let payload = emergency_alert_payload("+13053033060");
    let response = handler(ctx, post_request(&payload)).await.unwrap();

    let json = response_json(&response);
    assert_eq!(json["status"], "success");
    assert_eq!(json["smsStatus"], "sent");
    assert_eq!(json["simulated"], true);
    assert!(json["smsMessageId"].as_str().unwrap().starts_with("sim-"));
}

#[tokio::test]
async fn test_malformed_body_is_400_not_500() {
    let ctx = common::test_data::recording_context().0;

    let request = lambda_http::Request::new(lambda_http::Body::Text("{not json".to_string()));
    let response = handler(ctx, request).await.unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(response_json(&response)["status"], "error");
}

#[test]
fn test_error_taxonomy_maps_to_status_codes() {
    assert_eq!(
        AlertflowError::InvalidPhoneNumber("x".to_string()).status_code(),
        400
    );
    assert_eq!(AlertflowError::Validation("x".to_string()).status_code(), 400);
    assert_eq!(AlertflowError::NotFound("x".to_string()).status_code(), 404);
    assert_eq!(AlertflowError::Storage("x".to_string()).status_code(), 500);
    assert_eq!(AlertflowError::Transport("x".to_string()).status_code(), 500);
}

#[test]
fn test_only_storage_errors_are_retriable() {
    assert!(AlertflowError::Storage("x".to_string()).is_retriable());
    // A retried send could double-deliver an alert
    assert!(!AlertflowError::Transport("x".to_string()).is_retriable());
    assert!(!AlertflowError::Validation("x".to_string()).is_retriable());
    assert!(!AlertflowError::InvalidPhoneNumber("x".to_string()).is_retriable());
}
