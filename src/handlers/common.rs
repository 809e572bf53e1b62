/// Common handler utilities - response construction with CORS headers
use crate::error::AlertflowError;
use chrono::Utc;
use lambda_http::{Body, Response};
use serde::Serialize;

const CORS_ALLOW_ORIGIN: &str = "*";
const CORS_ALLOW_METHODS: &str = "GET,POST,OPTIONS";
const CORS_ALLOW_HEADERS: &str = "Content-Type,Authorization";

fn builder(status: u16) -> lambda_http::http::response::Builder {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .header("access-control-allow-origin", CORS_ALLOW_ORIGIN)
        .header("access-control-allow-methods", CORS_ALLOW_METHODS)
        .header("access-control-allow-headers", CORS_ALLOW_HEADERS)
}

/// Serializes `payload` as the JSON body of a CORS-enabled response.
pub fn json_response<T: Serialize>(
    status: u16,
    payload: &T,
) -> Result<Response<Body>, AlertflowError> {
    let body = serde_json::to_string(payload)?;
    builder(status)
        .body(Body::Text(body))
        .map_err(|e| AlertflowError::Lambda(format!("Failed to build response: {}", e)))
}

/// Renders an error as the standard error envelope.
pub fn error_response(error: &AlertflowError) -> Result<Response<Body>, AlertflowError> {
    let payload = serde_json::json!({
        "status": "error",
        "message": error.to_string(),
        "timestamp": Utc::now().to_rfc3339(),
    });
    json_response(error.status_code(), &payload)
}

/// Empty 200 for CORS preflight requests.
pub fn preflight_response() -> Result<Response<Body>, AlertflowError> {
    builder(200)
        .body(Body::Empty)
        .map_err(|e| AlertflowError::Lambda(format!("Failed to build response: {}", e)))
}
