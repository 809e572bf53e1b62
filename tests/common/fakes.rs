/// Fake transports and stores for integration testing
use alertflow::error::AlertflowError;
use alertflow::models::{Incident, LocationFix, SortOrder, Transport};
use alertflow::routing::PhoneNumber;
use alertflow::services::{IncidentStore, SendOptions, SmsSender};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// One captured send, for assertions.
#[derive(Debug, Clone)]
pub struct SentSms {
    pub destination: String,
    pub body: String,
    pub sender_id: Option<String>,
}

/// Sender that records every send and always succeeds.
#[derive(Clone)]
pub struct RecordingSender {
    transport: Transport,
    pub sent: Arc<Mutex<Vec<SentSms>>>,
}

impl RecordingSender {
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sent_messages(&self) -> Vec<SentSms> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsSender for RecordingSender {
    fn transport(&self) -> Transport {
        self.transport
    }

    async fn send(
        &self,
        destination: &PhoneNumber,
        body: &str,
        options: &SendOptions,
    ) -> Result<String, AlertflowError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentSms {
            destination: destination.as_str().to_string(),
            body: body.to_string(),
            sender_id: options.sender_id.clone(),
        });
        Ok(format!("fake-{}-{}", self.transport.as_str(), sent.len()))
    }
}

/// Sender whose every send fails with a provider error.
pub struct FailingSender {
    transport: Transport,
    error_detail: String,
}

impl FailingSender {
    pub fn new(transport: Transport, error_detail: &str) -> Self {
        Self {
            transport,
            error_detail: error_detail.to_string(),
        }
    }
}

#[async_trait]
impl SmsSender for FailingSender {
    fn transport(&self) -> Transport {
        self.transport
    }

    async fn send(
        &self,
        _destination: &PhoneNumber,
        _body: &str,
        _options: &SendOptions,
    ) -> Result<String, AlertflowError> {
        Err(AlertflowError::Transport(self.error_detail.clone()))
    }
}

/// Store whose every operation fails with a storage error.
pub struct FailingStore;

#[async_trait]
impl IncidentStore for FailingStore {
    async fn create_incident(&self, _incident: &Incident) -> Result<(), AlertflowError> {
        Err(AlertflowError::Storage("table unavailable".to_string()))
    }

    async fn get_incident(&self, _incident_id: &str) -> Result<Option<Incident>, AlertflowError> {
        Err(AlertflowError::Storage("table unavailable".to_string()))
    }

    async fn append_fix(&self, _fix: &LocationFix) -> Result<(), AlertflowError> {
        Err(AlertflowError::Storage("table unavailable".to_string()))
    }

    async fn latest_fix(&self, _incident_id: &str) -> Result<Option<LocationFix>, AlertflowError> {
        Err(AlertflowError::Storage("table unavailable".to_string()))
    }

    async fn fix_history(
        &self,
        _incident_id: &str,
        _limit: usize,
        _order: SortOrder,
    ) -> Result<Vec<LocationFix>, AlertflowError> {
        Err(AlertflowError::Storage("table unavailable".to_string()))
    }
}
