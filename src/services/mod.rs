pub mod config;
pub mod context;
pub mod dispatch;
pub mod sms;
pub mod store;

pub use config::AlertConfig;
pub use context::AppContext;
pub use dispatch::Dispatcher;
pub use sms::{PinpointSmsSender, SendOptions, SmsSender, SnsSmsSender};
pub use store::{DynamoDbIncidentStore, InMemoryIncidentStore, IncidentStore};
