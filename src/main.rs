use alertflow::services::AppContext;
use alertflow::handler;
use lambda_http::{run, service_fn, Error};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Structured JSON logs, level controlled by RUST_LOG
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(version = alertflow::VERSION, "Starting Alertflow Lambda function");

    let ctx = Arc::new(AppContext::new().await?);

    run(service_fn(move |request| {
        let ctx = ctx.clone();
        async move { handler(ctx, request).await }
    }))
    .await
}
