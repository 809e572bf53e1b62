/// HTTP request handlers
pub mod alert;
pub mod common;
pub mod location;
pub mod status;

use crate::error::AlertflowError;
use crate::models::ActionRequest;
use crate::services::context::AppContext;
use common::{error_response, preflight_response};
use lambda_http::http::Method;
use lambda_http::{Body, Request, Response};
use std::sync::Arc;
use tracing::{error, info};

/// Main request handler: CORS preflight, action parsing, dispatch.
///
/// Handler errors become the standard error envelope with the status code
/// the error category maps to; they never escape to the runtime.
pub async fn handler(
    ctx: Arc<AppContext>,
    request: Request,
) -> Result<Response<Body>, lambda_http::Error> {
    if request.method() == Method::OPTIONS {
        return Ok(preflight_response()?);
    }

    let action = match parse_action(request.body()) {
        Ok(action) => action,
        Err(e) => {
            error!(error = %e, "Rejected request");
            return Ok(error_response(&e)?);
        }
    };

    info!(action = action.action_name(), "Handling action");

    let result = dispatch_action(&ctx, action).await;
    match result {
        Ok(response) => Ok(response),
        Err(e) => {
            error!(error = %e, "Action failed");
            Ok(error_response(&e)?)
        }
    }
}

fn parse_action(body: &Body) -> Result<ActionRequest, AlertflowError> {
    let bytes: &[u8] = match body {
        Body::Empty => &[],
        Body::Text(text) => text.as_bytes(),
        Body::Binary(data) => data,
    };
    serde_json::from_slice(bytes)
        .map_err(|e| AlertflowError::Validation(format!("Invalid request body: {}", e)))
}

async fn dispatch_action(
    ctx: &AppContext,
    action: ActionRequest,
) -> Result<Response<Body>, AlertflowError> {
    match action {
        ActionRequest::EmergencyAlert(request) => {
            alert::handle_emergency_alert(ctx, request).await
        }
        ActionRequest::JuryTest(request) => alert::handle_jury_test(ctx, request).await,
        ActionRequest::TestSms(request) => alert::handle_test_sms(ctx, request).await,
        ActionRequest::AnalyzeAudio(request) => alert::handle_analyze_audio(request).await,
        ActionRequest::UpdateLocation(request) => {
            location::handle_update_location(ctx, request).await
        }
        ActionRequest::GetLocation(request) => location::handle_get_location(ctx, request).await,
        ActionRequest::GetLocationHistory(request) => {
            location::handle_location_history(ctx, request).await
        }
        ActionRequest::CheckConfig => status::handle_check_config(ctx).await,
    }
}
