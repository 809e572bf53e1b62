/// Configuration service - loads config from environment variables
use crate::error::AlertflowError;

/// Runtime configuration, loaded once at startup and held immutable for the
/// lifetime of the Lambda execution environment.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// DynamoDB table holding incident records
    pub incident_table: String,
    /// DynamoDB table holding location fixes
    pub location_table: String,
    /// Originating phone number for domestic sends
    pub origination_number: String,
    /// Alphanumeric sender ID, used only where the destination supports it
    pub sender_id: Option<String>,
    /// Pinpoint SMS configuration set for delivery events
    pub configuration_set: Option<String>,
    /// Base URL for live tracking pages
    pub tracking_url_base: Option<String>,
    /// When true, no provider is called and sends are simulated
    pub simulate: bool,
}

impl AlertConfig {
    pub fn from_env() -> Result<Self, AlertflowError> {
        let config = Self {
            incident_table: required("INCIDENT_TABLE")?,
            location_table: required("LOCATION_TABLE")?,
            origination_number: required("ORIGINATION_NUMBER")?,
            sender_id: optional("SENDER_ID"),
            configuration_set: optional("CONFIGURATION_SET"),
            tracking_url_base: optional("TRACKING_URL_BASE"),
            simulate: flag("SIMULATE_SMS"),
        };

        tracing::info!(
            incident_table = %config.incident_table,
            location_table = %config.location_table,
            simulate = config.simulate,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Builds the live-tracking URL for an incident, when a base is
    /// configured.
    pub fn tracking_url(&self, incident_id: &str) -> Option<String> {
        self.tracking_url_base
            .as_ref()
            .map(|base| format!("{}?incident={}", base, incident_id))
    }
}

fn required(name: &str) -> Result<String, AlertflowError> {
    std::env::var(name)
        .map_err(|_| AlertflowError::Config(format!("Missing {name} env var")))
        .and_then(|value| {
            if value.trim().is_empty() {
                Err(AlertflowError::Config(format!("{name} env var is empty")))
            } else {
                Ok(value)
            }
        })
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test_constants::*;

    fn build_test_config() -> AlertConfig {
        AlertConfig {
            incident_table: TEST_INCIDENT_TABLE.to_string(),
            location_table: TEST_LOCATION_TABLE.to_string(),
            origination_number: TEST_ORIGINATION_NUMBER.to_string(),
            sender_id: Some("ALERTFLOW".to_string()),
            configuration_set: None,
            tracking_url_base: Some("https://track.example.com/live".to_string()),
            simulate: true,
        }
    }

    #[test]
    fn test_config_missing_vars() {
        unsafe {
            std::env::remove_var("INCIDENT_TABLE");
            std::env::remove_var("LOCATION_TABLE");
            std::env::remove_var("ORIGINATION_NUMBER");
        }

        let result = AlertConfig::from_env();
        assert!(result.is_err());
    }

    #[test]
    fn test_tracking_url_with_base() {
        let config = build_test_config();
        assert_eq!(
            config.tracking_url("EMG-1A2B3C4D").as_deref(),
            Some("https://track.example.com/live?incident=EMG-1A2B3C4D")
        );
    }

    #[test]
    fn test_tracking_url_without_base() {
        let mut config = build_test_config();
        config.tracking_url_base = None;
        assert!(config.tracking_url("EMG-1A2B3C4D").is_none());
    }
}
