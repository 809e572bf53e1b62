/// Application context - service wiring for the Lambda runtime
use crate::constants::AWS_OPERATION_TIMEOUT_SECS;
use crate::error::AlertflowError;
use crate::services::config::AlertConfig;
use crate::services::dispatch::Dispatcher;
use crate::services::sms::{PinpointSmsSender, SnsSmsSender, SmsSender};
use crate::services::store::{DynamoDbIncidentStore, IncidentStore};
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use std::sync::Arc;
use std::time::Duration;

/// Everything a handler needs, built once per execution environment and
/// shared across invocations.
pub struct AppContext {
    pub config: AlertConfig,
    pub dispatcher: Dispatcher,
    pub store: Arc<dyn IncidentStore>,
}

impl AppContext {
    /// Builds the production context from the environment.
    ///
    /// Every outbound AWS call gets an explicit operation timeout so a hung
    /// provider cannot eat the whole Lambda deadline.
    pub async fn new() -> Result<Self, AlertflowError> {
        let config = AlertConfig::from_env()?;

        let timeout = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(AWS_OPERATION_TIMEOUT_SECS))
            .build();
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .timeout_config(timeout)
            .load()
            .await;

        let domestic: Arc<dyn SmsSender> = Arc::new(PinpointSmsSender::new(
            aws_sdk_pinpointsmsvoicev2::Client::new(&aws_config),
            config.origination_number.clone(),
        ));
        let fallback: Arc<dyn SmsSender> = Arc::new(SnsSmsSender::new(
            aws_sdk_sns::Client::new(&aws_config),
        ));

        let store: Arc<dyn IncidentStore> = Arc::new(DynamoDbIncidentStore::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.incident_table.clone(),
            config.location_table.clone(),
        ));

        let dispatcher = Dispatcher::new(domestic, fallback, &config);

        Ok(Self {
            config,
            dispatcher,
            store,
        })
    }

    /// Assembles a context from pre-built parts. Used by tests to swap in
    /// fakes.
    pub fn with_parts(
        config: AlertConfig,
        domestic: Arc<dyn SmsSender>,
        fallback: Arc<dyn SmsSender>,
        store: Arc<dyn IncidentStore>,
    ) -> Self {
        let dispatcher = Dispatcher::new(domestic, fallback, &config);
        Self {
            config,
            dispatcher,
            store,
        }
    }
}
