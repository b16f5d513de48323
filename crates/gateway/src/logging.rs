use crate::config::{Config, Environment};

pub fn setup_logging(config: &Config) {
    let environment = match config.environment {
        Environment::Development => common::Environment::Development,
        Environment::Production => common::Environment::Production,
    };
    common::logging::setup_logging_with_default(environment, config.log_level.as_str());
}
