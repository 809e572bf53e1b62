/// Transport selection and truthful dispatch
use crate::constants::SIMULATED_MESSAGE_ID_PREFIX;
use crate::models::{DispatchResult, Transport};
use crate::routing::{CountryProfile, PhoneNumber};
use crate::services::config::AlertConfig;
use crate::services::sms::{SendOptions, SmsSender};
use crate::utils::logging::{redact_body, redact_phone};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Routes each message to the sender matching the destination's country
/// profile and reports exactly what the provider reported.
///
/// A provider failure becomes `DispatchResult::failed` with the error
/// detail attached; a message id is never synthesized for a send that did
/// not happen. The single exception is simulate mode, which skips the
/// provider entirely and marks its result `simulated: true`.
pub struct Dispatcher {
    domestic: Arc<dyn SmsSender>,
    fallback: Arc<dyn SmsSender>,
    sender_id: Option<String>,
    configuration_set: Option<String>,
    simulate: bool,
}

impl Dispatcher {
    pub fn new(
        domestic: Arc<dyn SmsSender>,
        fallback: Arc<dyn SmsSender>,
        config: &AlertConfig,
    ) -> Self {
        Self {
            domestic,
            fallback,
            sender_id: config.sender_id.clone(),
            configuration_set: config.configuration_set.clone(),
            simulate: config.simulate,
        }
    }

    fn sender_for(&self, transport: Transport) -> &Arc<dyn SmsSender> {
        match transport {
            Transport::Domestic => &self.domestic,
            Transport::Fallback => &self.fallback,
        }
    }

    /// Sends one message to one destination. Exactly one provider attempt;
    /// the result is truthful either way.
    pub async fn dispatch(
        &self,
        destination: &PhoneNumber,
        body: &str,
        profile: &CountryProfile,
    ) -> DispatchResult {
        let transport = profile.transport;

        debug!(
            destination = %redact_phone(destination.as_str()),
            transport = transport.as_str(),
            body = %redact_body(body),
            "Dispatching SMS"
        );

        if self.simulate {
            let message_id = format!(
                "{}-{}",
                SIMULATED_MESSAGE_ID_PREFIX,
                Uuid::new_v4().simple()
            );
            info!(
                destination = %redact_phone(destination.as_str()),
                transport = transport.as_str(),
                message_id = %message_id,
                "Simulate mode: skipping provider call"
            );
            return DispatchResult::simulated(transport, message_id);
        }

        let options = SendOptions {
            sender_id: if profile.sender_id_supported {
                self.sender_id.clone()
            } else {
                None
            },
            configuration_set: self.configuration_set.clone(),
        };

        match self
            .sender_for(transport)
            .send(destination, body, &options)
            .await
        {
            Ok(message_id) => DispatchResult::sent(transport, message_id),
            Err(e) => {
                warn!(
                    destination = %redact_phone(destination.as_str()),
                    transport = transport.as_str(),
                    error = %e,
                    "SMS dispatch failed"
                );
                DispatchResult::failed(transport, e.to_string())
            }
        }
    }
}
