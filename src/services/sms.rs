/// SMS transport implementations
///
/// Two providers: the domestic route uses AWS End User Messaging (Pinpoint
/// SMS Voice v2) with a registered origination number, the fallback route
/// publishes through SNS for destinations the domestic pool cannot reach.
/// Neither implementation retries; re-sending an alert with no idempotency
/// key risks double delivery.
use crate::error::AlertflowError;
use crate::models::Transport;
use crate::routing::PhoneNumber;
use crate::utils::logging::{redact_phone, redact_phones};
use async_trait::async_trait;

/// Per-send options resolved by the dispatcher from config and the
/// destination's country profile.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Alphanumeric sender ID; `None` when the destination region drops
    /// messages carrying one.
    pub sender_id: Option<String>,
    /// Configuration set name for delivery event routing
    pub configuration_set: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Which transport this sender implements
    fn transport(&self) -> Transport;

    /// Sends one transactional SMS, returning the provider message id.
    async fn send(
        &self,
        destination: &PhoneNumber,
        body: &str,
        options: &SendOptions,
    ) -> Result<String, AlertflowError>;
}

/// Domestic sender backed by AWS End User Messaging
pub struct PinpointSmsSender {
    client: aws_sdk_pinpointsmsvoicev2::Client,
    origination_number: String,
}

impl PinpointSmsSender {
    pub fn new(client: aws_sdk_pinpointsmsvoicev2::Client, origination_number: String) -> Self {
        Self {
            client,
            origination_number,
        }
    }
}

#[async_trait]
impl SmsSender for PinpointSmsSender {
    fn transport(&self) -> Transport {
        Transport::Domestic
    }

    async fn send(
        &self,
        destination: &PhoneNumber,
        body: &str,
        options: &SendOptions,
    ) -> Result<String, AlertflowError> {
        use aws_sdk_pinpointsmsvoicev2::types::MessageType;

        let response = self
            .client
            .send_text_message()
            .destination_phone_number(destination.as_str())
            .origination_identity(&self.origination_number)
            .message_body(body)
            .message_type(MessageType::Transactional)
            .set_configuration_set_name(options.configuration_set.clone())
            .send()
            .await
            .map_err(|e| {
                AlertflowError::Transport(redact_phones(&format!(
                    "send_text_message failed: {}",
                    e
                )))
            })?;

        let message_id = response.message_id().map(str::to_string).ok_or_else(|| {
            AlertflowError::Transport("Provider accepted send but returned no message id".to_string())
        })?;

        tracing::info!(
            destination = %redact_phone(destination.as_str()),
            message_id = %message_id,
            "Sent SMS via domestic transport"
        );
        Ok(message_id)
    }
}

/// Fallback sender backed by SNS SMS publish
pub struct SnsSmsSender {
    client: aws_sdk_sns::Client,
}

impl SnsSmsSender {
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SmsSender for SnsSmsSender {
    fn transport(&self) -> Transport {
        Transport::Fallback
    }

    async fn send(
        &self,
        destination: &PhoneNumber,
        body: &str,
        options: &SendOptions,
    ) -> Result<String, AlertflowError> {
        use aws_sdk_sns::types::MessageAttributeValue;

        let sms_type = MessageAttributeValue::builder()
            .data_type("String")
            .string_value("Transactional")
            .build()
            .map_err(|e| {
                AlertflowError::Transport(format!("Failed to build SMS type attribute: {}", e))
            })?;

        let mut request = self
            .client
            .publish()
            .phone_number(destination.as_str())
            .message(body)
            .message_attributes("AWS.SNS.SMS.SMSType", sms_type);

        if let Some(sender_id) = &options.sender_id {
            let attribute = MessageAttributeValue::builder()
                .data_type("String")
                .string_value(sender_id)
                .build()
                .map_err(|e| {
                    AlertflowError::Transport(format!(
                        "Failed to build sender ID attribute: {}",
                        e
                    ))
                })?;
            request = request.message_attributes("AWS.SNS.SMS.SenderID", attribute);
        }

        let response = request.send().await.map_err(|e| {
            AlertflowError::Transport(redact_phones(&format!("SNS publish failed: {}", e)))
        })?;

        let message_id = response.message_id().map(str::to_string).ok_or_else(|| {
            AlertflowError::Transport("SNS publish returned no message id".to_string())
        })?;

        tracing::info!(
            destination = %redact_phone(destination.as_str()),
            message_id = %message_id,
            "Sent SMS via fallback transport"
        );
        Ok(message_id)
    }
}
