use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with pretty formatting for development
/// and JSON formatting for production.
///
/// Uses the RUST_LOG environment variable for filtering (defaults to "info"
/// if not set).
pub fn setup_logging(environment: Environment) {
    setup_logging_with_default(environment, "info");
}

/// Like [`setup_logging`], with a caller-chosen filter used when RUST_LOG
/// is not set.
pub fn setup_logging_with_default(environment: Environment, default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(env_filter);

    match environment {
        Environment::Production => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_level(true))
                .init();
        }
        Environment::Development => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_ansi(true))
                .init();
        }
    }
}
