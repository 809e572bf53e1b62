/// CHECK_CONFIG: runtime configuration introspection
use crate::constants::SOURCE_NAME;
use crate::error::AlertflowError;
use crate::handlers::common::json_response;
use crate::routing::countries::profiles;
use crate::services::context::AppContext;
use chrono::Utc;
use lambda_http::{Body, Response};

pub async fn handle_check_config(ctx: &AppContext) -> Result<Response<Body>, AlertflowError> {
    let countries: Vec<serde_json::Value> = profiles()
        .iter()
        .map(|p| {
            serde_json::json!({
                "prefix": p.prefix,
                "name": p.name,
                "emergencyNumber": p.emergency_number,
                "language": p.language,
                "transport": p.transport,
                "senderIdSupported": p.sender_id_supported,
                "includeTrackingUrl": p.include_tracking_url,
            })
        })
        .collect();

    let payload = serde_json::json!({
        "status": "success",
        "service": SOURCE_NAME,
        "version": crate::VERSION,
        "simulate": ctx.config.simulate,
        "trackingConfigured": ctx.config.tracking_url_base.is_some(),
        "senderIdConfigured": ctx.config.sender_id.is_some(),
        "countries": countries,
        "timestamp": Utc::now().to_rfc3339(),
    });
    json_response(200, &payload)
}
