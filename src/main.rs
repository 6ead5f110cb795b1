use std::sync::Arc;

use f1_notion_calendar::config::Config;
use f1_notion_calendar::handler::handler;
use lambda_runtime::{Error, service_fn};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();

    // Local runs may keep credentials in a .env file
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    lambda_runtime::run(service_fn(move |event| {
        let config = Arc::clone(&config);
        async move { handler(event, config).await }
    }))
    .await
}
