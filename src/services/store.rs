/// DynamoDB-backed incident and location-fix storage
///
/// Incidents are written once and expire after 7 days. Location fixes are
/// append-only under `(incidentId, capturedAtMs)` and expire after 24
/// hours. Both tables rely on DynamoDB TTL via the `expiresAt` attribute.
use crate::error::AlertflowError;
use crate::models::{DetectionType, Incident, LocationFix, LocationInput, SortOrder};
use crate::utils::retry::retry_default;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

#[async_trait]
pub trait IncidentStore: Send + Sync {
    /// Persists a new incident record. Fails if the id already exists.
    async fn create_incident(&self, incident: &Incident) -> Result<(), AlertflowError>;

    /// Fetches an incident by id.
    async fn get_incident(&self, incident_id: &str) -> Result<Option<Incident>, AlertflowError>;

    /// Appends one location fix to an incident's track.
    async fn append_fix(&self, fix: &LocationFix) -> Result<(), AlertflowError>;

    /// Returns the most recent fix for an incident, if any.
    async fn latest_fix(&self, incident_id: &str) -> Result<Option<LocationFix>, AlertflowError>;

    /// Returns up to `limit` fixes ordered by capture time.
    async fn fix_history(
        &self,
        incident_id: &str,
        limit: usize,
        order: SortOrder,
    ) -> Result<Vec<LocationFix>, AlertflowError>;
}

/// DynamoDB implementation
pub struct DynamoDbIncidentStore {
    client: aws_sdk_dynamodb::Client,
    incident_table: String,
    location_table: String,
}

impl DynamoDbIncidentStore {
    pub fn new(
        client: aws_sdk_dynamodb::Client,
        incident_table: String,
        location_table: String,
    ) -> Self {
        Self {
            client,
            incident_table,
            location_table,
        }
    }
}

#[async_trait]
impl IncidentStore for DynamoDbIncidentStore {
    async fn create_incident(&self, incident: &Incident) -> Result<(), AlertflowError> {
        let item = incident_to_item(incident)?;

        retry_default(
            || {
                let client = self.client.clone();
                let table = self.incident_table.clone();
                let item = item.clone();
                async move {
                    client
                        .put_item()
                        .table_name(table)
                        .set_item(Some(item))
                        .condition_expression("attribute_not_exists(incidentId)")
                        .send()
                        .await
                        .map_err(|e| {
                            AlertflowError::Storage(format!("DynamoDB put_item failed: {}", e))
                        })?;
                    Ok(())
                }
            },
            "create_incident",
        )
        .await?;

        info!(incident_id = %incident.incident_id, "Incident record created");
        Ok(())
    }

    async fn get_incident(&self, incident_id: &str) -> Result<Option<Incident>, AlertflowError> {
        let result = retry_default(
            || {
                let client = self.client.clone();
                let table = self.incident_table.clone();
                let id = incident_id.to_string();
                async move {
                    client
                        .get_item()
                        .table_name(table)
                        .key("incidentId", AttributeValue::S(id))
                        .send()
                        .await
                        .map_err(|e| {
                            AlertflowError::Storage(format!("DynamoDB get_item failed: {}", e))
                        })
                }
            },
            "get_incident",
        )
        .await?;

        result.item.map(|item| incident_from_item(&item)).transpose()
    }

    async fn append_fix(&self, fix: &LocationFix) -> Result<(), AlertflowError> {
        let item = fix_to_item(fix);

        retry_default(
            || {
                let client = self.client.clone();
                let table = self.location_table.clone();
                let item = item.clone();
                async move {
                    client
                        .put_item()
                        .table_name(table)
                        .set_item(Some(item))
                        .send()
                        .await
                        .map_err(|e| {
                            AlertflowError::Storage(format!("DynamoDB put_item failed: {}", e))
                        })?;
                    Ok(())
                }
            },
            "append_fix",
        )
        .await?;

        debug!(
            incident_id = %fix.incident_id,
            captured_at_ms = fix.captured_at_ms,
            "Location fix appended"
        );
        Ok(())
    }

    async fn latest_fix(&self, incident_id: &str) -> Result<Option<LocationFix>, AlertflowError> {
        let mut fixes = self
            .fix_history(incident_id, 1, SortOrder::Descending)
            .await?;
        Ok(fixes.pop())
    }

    async fn fix_history(
        &self,
        incident_id: &str,
        limit: usize,
        order: SortOrder,
    ) -> Result<Vec<LocationFix>, AlertflowError> {
        let ascending = matches!(order, SortOrder::Ascending);

        let result = retry_default(
            || {
                let client = self.client.clone();
                let table = self.location_table.clone();
                let id = incident_id.to_string();
                async move {
                    client
                        .query()
                        .table_name(table)
                        .key_condition_expression("incidentId = :id")
                        .expression_attribute_values(":id", AttributeValue::S(id))
                        .scan_index_forward(ascending)
                        .limit(limit.min(i32::MAX as usize) as i32)
                        .send()
                        .await
                        .map_err(|e| {
                            AlertflowError::Storage(format!("DynamoDB query failed: {}", e))
                        })
                }
            },
            "fix_history",
        )
        .await?;

        result
            .items()
            .iter()
            .map(fix_from_item)
            .collect::<Result<Vec<_>, _>>()
    }
}

// ---------------------------------------------------------------------------
// Attribute mapping
// ---------------------------------------------------------------------------

fn put_s(item: &mut HashMap<String, AttributeValue>, key: &str, value: &str) {
    item.insert(key.to_string(), AttributeValue::S(value.to_string()));
}

fn put_n(item: &mut HashMap<String, AttributeValue>, key: &str, value: impl ToString) {
    item.insert(key.to_string(), AttributeValue::N(value.to_string()));
}

fn get_s(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, AlertflowError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| AlertflowError::Storage(format!("Missing string attribute '{}'", key)))
}

fn get_n<T: std::str::FromStr>(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<T, AlertflowError> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| AlertflowError::Storage(format!("Missing numeric attribute '{}'", key)))
}

fn get_n_opt<T: std::str::FromStr>(item: &HashMap<String, AttributeValue>, key: &str) -> Option<T> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
}

fn incident_to_item(
    incident: &Incident,
) -> Result<HashMap<String, AttributeValue>, AlertflowError> {
    let mut item = HashMap::new();
    put_s(&mut item, "incidentId", &incident.incident_id);
    put_s(&mut item, "victimName", &incident.victim_name);
    put_s(&mut item, "emergencyPhone", &incident.emergency_phone);
    put_s(&mut item, "countryCode", &incident.country_code);
    put_s(&mut item, "detectionType", incident.detection_type.as_str());
    put_s(&mut item, "status", &incident.status);
    put_s(&mut item, "createdAt", &incident.created_at.to_rfc3339());
    put_n(&mut item, "expiresAt", incident.expires_at);
    if let Some(location) = &incident.initial_location {
        let json = serde_json::to_string(location).map_err(|e| {
            AlertflowError::Storage(format!("Invalid initialLocation value: {}", e))
        })?;
        put_s(&mut item, "initialLocation", &json);
    }
    Ok(item)
}

fn incident_from_item(
    item: &HashMap<String, AttributeValue>,
) -> Result<Incident, AlertflowError> {
    let created_at = get_s(item, "createdAt")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| AlertflowError::Storage(format!("Invalid createdAt timestamp: {}", e)))?
        .with_timezone(&Utc);

    let initial_location: Option<LocationInput> = match item.get("initialLocation") {
        Some(AttributeValue::S(json)) => Some(serde_json::from_str(json).map_err(|e| {
            AlertflowError::Storage(format!("Invalid initialLocation attribute: {}", e))
        })?),
        _ => None,
    };

    Ok(Incident {
        incident_id: get_s(item, "incidentId")?,
        victim_name: get_s(item, "victimName")?,
        emergency_phone: get_s(item, "emergencyPhone")?,
        country_code: get_s(item, "countryCode")?,
        detection_type: DetectionType::parse(&get_s(item, "detectionType")?),
        initial_location,
        created_at,
        status: get_s(item, "status")?,
        expires_at: get_n(item, "expiresAt")?,
    })
}

fn fix_to_item(fix: &LocationFix) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    put_s(&mut item, "incidentId", &fix.incident_id);
    put_n(&mut item, "capturedAtMs", fix.captured_at_ms);
    put_n(&mut item, "latitude", fix.latitude);
    put_n(&mut item, "longitude", fix.longitude);
    put_n(&mut item, "accuracy", fix.accuracy);
    if let Some(speed) = fix.speed {
        put_n(&mut item, "speed", speed);
    }
    if let Some(heading) = fix.heading {
        put_n(&mut item, "heading", heading);
    }
    if let Some(battery) = fix.battery_level {
        put_n(&mut item, "batteryLevel", battery);
    }
    put_n(&mut item, "expiresAt", fix.expires_at);
    item
}

fn fix_from_item(item: &HashMap<String, AttributeValue>) -> Result<LocationFix, AlertflowError> {
    Ok(LocationFix {
        incident_id: get_s(item, "incidentId")?,
        captured_at_ms: get_n(item, "capturedAtMs")?,
        latitude: get_n(item, "latitude")?,
        longitude: get_n(item, "longitude")?,
        accuracy: get_n(item, "accuracy")?,
        speed: get_n_opt(item, "speed"),
        heading: get_n_opt(item, "heading"),
        battery_level: get_n_opt(item, "batteryLevel"),
        expires_at: get_n(item, "expiresAt")?,
    })
}

// ---------------------------------------------------------------------------
// In-memory implementation for testing
// ---------------------------------------------------------------------------

/// In-memory incident store for tests and local runs
pub struct InMemoryIncidentStore {
    incidents: tokio::sync::Mutex<HashMap<String, Incident>>,
    fixes: tokio::sync::Mutex<HashMap<String, Vec<LocationFix>>>,
}

impl InMemoryIncidentStore {
    pub fn new() -> Self {
        Self {
            incidents: tokio::sync::Mutex::new(HashMap::new()),
            fixes: tokio::sync::Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryIncidentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IncidentStore for InMemoryIncidentStore {
    async fn create_incident(&self, incident: &Incident) -> Result<(), AlertflowError> {
        let mut incidents = self.incidents.lock().await;
        if incidents.contains_key(&incident.incident_id) {
            return Err(AlertflowError::Storage(format!(
                "Incident '{}' already exists",
                incident.incident_id
            )));
        }
        incidents.insert(incident.incident_id.clone(), incident.clone());
        Ok(())
    }

    async fn get_incident(&self, incident_id: &str) -> Result<Option<Incident>, AlertflowError> {
        Ok(self.incidents.lock().await.get(incident_id).cloned())
    }

    async fn append_fix(&self, fix: &LocationFix) -> Result<(), AlertflowError> {
        let mut fixes = self.fixes.lock().await;
        let track = fixes.entry(fix.incident_id.clone()).or_default();
        track.push(fix.clone());
        track.sort_by_key(|f| f.captured_at_ms);
        Ok(())
    }

    async fn latest_fix(&self, incident_id: &str) -> Result<Option<LocationFix>, AlertflowError> {
        Ok(self
            .fixes
            .lock()
            .await
            .get(incident_id)
            .and_then(|track| track.last().cloned()))
    }

    async fn fix_history(
        &self,
        incident_id: &str,
        limit: usize,
        order: SortOrder,
    ) -> Result<Vec<LocationFix>, AlertflowError> {
        let fixes = self.fixes.lock().await;
        let track = fixes.get(incident_id).cloned().unwrap_or_default();
        let mut ordered = track;
        if matches!(order, SortOrder::Descending) {
            ordered.reverse();
        }
        ordered.truncate(limit);
        Ok(ordered)
    }
}
