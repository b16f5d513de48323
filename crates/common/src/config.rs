use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Read from the ENVIRONMENT variable, defaulting to development.
    pub fn from_env() -> Self {
        let value = env::var("ENVIRONMENT").unwrap_or_default();
        Self::parse(&value)
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_production_aliases() {
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("PROD"), Environment::Production);
    }

    #[test]
    fn anything_else_is_development() {
        assert_eq!(Environment::parse(""), Environment::Development);
        assert_eq!(Environment::parse("staging"), Environment::Development);
    }
}
