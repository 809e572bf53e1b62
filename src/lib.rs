/// Alertflow - emergency SMS alert dispatch for serverless deployment
///
/// Normalizes destination numbers, picks a transport per destination
/// country, composes localized alerts within the single-segment SMS
/// budget, and tracks incident location fixes with bounded retention.
pub mod constants;
pub mod detect;
pub mod error;
pub mod handlers;
pub mod message;
pub mod models;
pub mod routing;
pub mod services;
pub mod utils;

pub use error::AlertflowError;
pub use handlers::handler;

/// Crate version, surfaced by CHECK_CONFIG
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
