/// Location tracking actions
use crate::constants::{DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
use crate::error::AlertflowError;
use crate::handlers::common::json_response;
use crate::models::{
    LocationFix, LocationHistoryRequest, LocationQueryRequest, UpdateLocationRequest,
};
use crate::services::context::AppContext;
use chrono::Utc;
use lambda_http::{Body, Response};
use tracing::{debug, info};

fn require_incident_id(incident_id: Option<&str>) -> Result<&str, AlertflowError> {
    incident_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AlertflowError::Validation("incidentId is required".to_string()))
}

/// UPDATE_LOCATION: append a fix to an existing incident's track.
///
/// Fixes for unknown incidents are rejected rather than stored; an
/// orphaned track would never be readable through the query actions.
pub async fn handle_update_location(
    ctx: &AppContext,
    request: UpdateLocationRequest,
) -> Result<Response<Body>, AlertflowError> {
    let incident_id = require_incident_id(request.incident_id.as_deref())?;

    if ctx.store.get_incident(incident_id).await?.is_none() {
        return Err(AlertflowError::NotFound(format!(
            "Incident '{}' not found",
            incident_id
        )));
    }

    let (latitude, longitude) = match (request.location.latitude, request.location.longitude) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(AlertflowError::Validation(
                "location.latitude and location.longitude are required".to_string(),
            ));
        }
    };

    let fix = LocationFix::captured_now(
        incident_id.to_string(),
        latitude,
        longitude,
        request.location.accuracy.unwrap_or_default(),
        request.location.speed,
        request.location.heading,
        request.battery_level,
    );
    ctx.store.append_fix(&fix).await?;

    info!(
        incident_id = incident_id,
        captured_at_ms = fix.captured_at_ms,
        "Location updated"
    );

    let payload = serde_json::json!({
        "status": "success",
        "message": "Location updated",
        "incidentId": incident_id,
        "capturedAtMs": fix.captured_at_ms,
        "timestamp": Utc::now().to_rfc3339(),
    });
    json_response(200, &payload)
}

/// GET_LOCATION: the most recent fix for an incident.
pub async fn handle_get_location(
    ctx: &AppContext,
    request: LocationQueryRequest,
) -> Result<Response<Body>, AlertflowError> {
    let incident_id = require_incident_id(request.incident_id.as_deref())?;

    let fix = ctx.store.latest_fix(incident_id).await?.ok_or_else(|| {
        AlertflowError::NotFound(format!("No location found for incident '{}'", incident_id))
    })?;

    let payload = serde_json::json!({
        "status": "success",
        "incidentId": incident_id,
        "location": fix,
        "timestamp": Utc::now().to_rfc3339(),
    });
    json_response(200, &payload)
}

/// GET_LOCATION_HISTORY: ordered fixes for an incident, capped at a
/// hard limit.
pub async fn handle_location_history(
    ctx: &AppContext,
    request: LocationHistoryRequest,
) -> Result<Response<Body>, AlertflowError> {
    let incident_id = require_incident_id(request.incident_id.as_deref())?;

    let limit = request
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let order = request.order.unwrap_or_default();

    let fixes = ctx.store.fix_history(incident_id, limit, order).await?;

    debug!(
        incident_id = incident_id,
        count = fixes.len(),
        limit = limit,
        "Location history fetched"
    );

    let payload = serde_json::json!({
        "status": "success",
        "incidentId": incident_id,
        "count": fixes.len(),
        "locations": fixes,
        "timestamp": Utc::now().to_rfc3339(),
    });
    json_response(200, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_incident_id() {
        assert!(require_incident_id(None).is_err());
        assert!(require_incident_id(Some("")).is_err());
        assert!(require_incident_id(Some("   ")).is_err());
        assert_eq!(require_incident_id(Some("EMG-1A2B3C4D")).unwrap(), "EMG-1A2B3C4D");
    }
}
