pub mod logging;
pub mod retry;

pub use retry::{retry_default, retry_with_backoff, RetryConfig};
