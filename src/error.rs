/// Error types for the Alertflow system
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertflowError {
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Lambda runtime error: {0}")]
    Lambda(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AlertflowError {
    /// Determines if an error is retriable
    ///
    /// Only storage calls retry. A Transport failure is never retried:
    /// sends carry no idempotency key, so a retry can double-deliver an
    /// alert.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPhoneNumber(_) | Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            _ => 500,
        }
    }
}

// Implement conversions for common error types
impl From<serde_json::Error> for AlertflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Lambda(err.to_string())
    }
}

impl From<std::env::VarError> for AlertflowError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}
