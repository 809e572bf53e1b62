/// Alert-style actions: emergency dispatch, test sends, audio analysis
use crate::detect::classify_transcript;
use crate::error::AlertflowError;
use crate::handlers::common::json_response;
use crate::message::{compose_alert, compose_test, AlertDetails};
use crate::models::{
    AlertResponse, AnalyzeAudioRequest, ContactDispatchReport, EmergencyAlertRequest, Incident,
    JuryTestRequest, LocationFix, ResponseStatus, TestSmsRequest,
};
use crate::routing::{select_profile, CountryProfile, PhoneNumber};
use crate::services::context::AppContext;
use crate::utils::logging::redact_phone;
use chrono::Utc;
use lambda_http::{Body, Response};
use tracing::{info, warn};

struct Recipient {
    name: String,
    phone: PhoneNumber,
    profile: &'static CountryProfile,
}

/// Resolves the list of destinations for an alert.
///
/// Opted-in contacts win over the single `phoneNumber` field; every number
/// is validated up front so a malformed destination rejects the request
/// before anything is sent.
fn resolve_recipients(
    request: &EmergencyAlertRequest,
) -> Result<(Vec<Recipient>, bool), AlertflowError> {
    let mut recipients = Vec::new();
    let from_contacts = request.contacts.iter().any(|c| c.opted_in);

    if from_contacts {
        for contact in request.contacts.iter().filter(|c| c.opted_in) {
            let raw = contact.phone.as_deref().ok_or_else(|| {
                AlertflowError::Validation("Opted-in contact has no phone number".to_string())
            })?;
            let phone = PhoneNumber::parse(raw)?;
            let profile = select_profile(&phone);
            recipients.push(Recipient {
                name: contact.name.clone().unwrap_or_else(|| "Contact".to_string()),
                phone,
                profile,
            });
        }
    } else if let Some(raw) = &request.phone_number {
        let phone = PhoneNumber::parse(raw)?;
        let profile = select_profile(&phone);
        recipients.push(Recipient {
            name: "Emergency Contact".to_string(),
            phone,
            profile,
        });
    }

    if recipients.is_empty() {
        return Err(AlertflowError::Validation(
            "No recipient phone number provided".to_string(),
        ));
    }
    Ok((recipients, from_contacts))
}

/// JURY_EMERGENCY_ALERT: create an incident, then alert every recipient.
///
/// Storage is best-effort: a store failure downgrades to `storeWarning` so
/// the SMS still goes out. Dispatch outcomes are reported exactly as the
/// providers returned them.
pub async fn handle_emergency_alert(
    ctx: &AppContext,
    request: EmergencyAlertRequest,
) -> Result<Response<Body>, AlertflowError> {
    let (recipients, from_contacts) = resolve_recipients(&request)?;
    let primary = &recipients[0];

    info!(
        victim = %request.victim_name,
        recipients = recipients.len(),
        primary = %redact_phone(primary.phone.as_str()),
        country = primary.profile.name,
        "Processing emergency alert"
    );

    let incident = Incident::new(
        request.victim_name.clone(),
        primary.phone.as_str().to_string(),
        primary.profile.prefix.to_string(),
        request.detection_type,
        Some(request.location.clone()),
    );

    let mut store_warning = None;
    if let Err(e) = ctx.store.create_incident(&incident).await {
        warn!(incident_id = %incident.incident_id, error = %e, "Incident record not persisted");
        store_warning = Some(format!("Incident not persisted: {}", e));
    } else if request.location.has_coordinates() {
        let fix = LocationFix::captured_now(
            incident.incident_id.clone(),
            request.location.latitude.unwrap_or_default(),
            request.location.longitude.unwrap_or_default(),
            request.location.accuracy.unwrap_or_default(),
            request.location.speed,
            request.location.heading,
            None,
        );
        if let Err(e) = ctx.store.append_fix(&fix).await {
            warn!(incident_id = %incident.incident_id, error = %e, "Initial fix not persisted");
            store_warning = Some(format!("Initial location not persisted: {}", e));
        }
    }

    let tracking_url = ctx.config.tracking_url(&incident.incident_id);

    let mut reports = Vec::new();
    for recipient in &recipients {
        let details = AlertDetails {
            victim_name: &request.victim_name,
            detection_type: &request.detection_type,
            detection_data: &request.detection_data,
            location: Some(&request.location),
            incident_id: &incident.incident_id,
            tracking_url: tracking_url.as_deref(),
        };
        let body = compose_alert(&details, recipient.profile);
        let result = ctx
            .dispatcher
            .dispatch(&recipient.phone, &body, recipient.profile)
            .await;
        reports.push(ContactDispatchReport {
            name: recipient.name.clone(),
            phone: recipient.phone.as_str().to_string(),
            result,
        });
    }

    let sent = reports.iter().filter(|r| r.result.is_sent()).count();
    let (status, message) = if sent == reports.len() {
        (ResponseStatus::Success, "Emergency alert processed")
    } else if sent > 0 {
        (ResponseStatus::Partial, "Emergency alert partially delivered")
    } else {
        (ResponseStatus::Failed, "Emergency alert could not be delivered")
    };

    let mut response = AlertResponse::new(status, message).with_dispatch(&reports[0].result);
    response.incident_id = Some(incident.incident_id);
    response.victim_name = Some(request.victim_name);
    response.country = Some(primary.profile.name);
    response.language = Some(primary.profile.language.as_str());
    response.emergency_number = Some(primary.profile.emergency_number);
    response.tracking_url = tracking_url;
    response.store_warning = store_warning;
    if from_contacts {
        response.contact_results = reports;
    }

    json_response(200, &response)
}

/// JURY_TEST: one localized test SMS, exercising the full pipeline.
pub async fn handle_jury_test(
    ctx: &AppContext,
    request: JuryTestRequest,
) -> Result<Response<Body>, AlertflowError> {
    let raw = request.phone_number.as_deref().ok_or_else(|| {
        AlertflowError::Validation("phoneNumber is required for JURY_TEST".to_string())
    })?;
    let phone = PhoneNumber::parse(raw)?;
    let profile = select_profile(&phone);

    let body = compose_test(&request.victim_name, profile);
    let result = ctx.dispatcher.dispatch(&phone, &body, profile).await;

    let status = if result.is_sent() {
        ResponseStatus::Success
    } else {
        ResponseStatus::Failed
    };
    let mut response = AlertResponse::new(status, "System test processed").with_dispatch(&result);
    response.victim_name = Some(request.victim_name);
    response.country = Some(profile.name);
    response.language = Some(profile.language.as_str());
    response.emergency_number = Some(profile.emergency_number);

    json_response(200, &response)
}

/// TEST_SMS: send an arbitrary message for connectivity checks.
pub async fn handle_test_sms(
    ctx: &AppContext,
    request: TestSmsRequest,
) -> Result<Response<Body>, AlertflowError> {
    let raw = request.phone_number.as_deref().ok_or_else(|| {
        AlertflowError::Validation("phoneNumber is required for TEST_SMS".to_string())
    })?;
    let phone = PhoneNumber::parse(raw)?;
    let profile = select_profile(&phone);

    let body = request
        .message
        .unwrap_or_else(|| format!("Test message from Alertflow at {}", Utc::now().format("%H:%M:%S")));
    let result = ctx.dispatcher.dispatch(&phone, &body, profile).await;

    let status = if result.is_sent() {
        ResponseStatus::Success
    } else {
        ResponseStatus::Failed
    };
    let response = AlertResponse::new(status, "Test SMS processed").with_dispatch(&result);
    json_response(200, &response)
}

/// ANALYZE_AUDIO: keyword-scan a transcript and report the assessment.
/// No SMS is sent from this action.
pub async fn handle_analyze_audio(
    request: AnalyzeAudioRequest,
) -> Result<Response<Body>, AlertflowError> {
    let assessment = classify_transcript(&request.audio_data);

    info!(
        level = ?assessment.level,
        confidence = assessment.confidence,
        "Audio transcript analyzed"
    );

    let payload = serde_json::json!({
        "status": "success",
        "assessment": assessment,
        "timestamp": Utc::now().to_rfc3339(),
    });
    json_response(200, &payload)
}
