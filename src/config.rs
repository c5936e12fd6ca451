use secrecy::Secret;
use std::env;
use std::fmt;

pub const DEFAULT_SECRET_KEY: &str = "mysecretkey";
pub const DEFAULT_DATABASE_URL: &str = "sqlite:///site.db";
pub const DEFAULT_JWT_SECRET_KEY: &str = "my_jwt_secret_key";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(value) => write!(f, "PORT must be a valid port number, got {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SECRET_KEY`; no route signs with it at the moment
    pub secret_key: Secret<String>,
    pub database_url: String,
    pub jwt_secret_key: Secret<String>,
    pub host: String,
    pub port: u16,
    /// Comma-separated list of origins allowed by CORS
    pub cors_allowed_origins: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            secret_key: Secret::new(get("SECRET_KEY", DEFAULT_SECRET_KEY)),
            database_url: get("DATABASE_URL", DEFAULT_DATABASE_URL),
            jwt_secret_key: Secret::new(get("JWT_SECRET_KEY", DEFAULT_JWT_SECRET_KEY)),
            host: get("HOST", DEFAULT_HOST),
            port,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ALLOWED_ORIGINS),
        })
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]).expect("Defaults should load");
        assert_eq!(config.secret_key.expose_secret(), "mysecretkey");
        assert_eq!(config.database_url, "sqlite:///site.db");
        assert_eq!(config.jwt_secret_key.expose_secret(), "my_jwt_secret_key");
        assert_eq!(config.port, 8080);
        assert_eq!(config.allowed_origins(), vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = config_with(&[
            ("JWT_SECRET_KEY", "override"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "5000"),
        ])
        .expect("Overrides should load");
        assert_eq!(config.jwt_secret_key.expose_secret(), "override");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = config_with(&[("PORT", "eighty")]);
        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));
    }

    #[test]
    fn test_allowed_origins_split_and_trimmed() {
        let config = config_with(&[("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,")])
            .expect("Should load");
        assert_eq!(config.allowed_origins(), vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let config = config_with(&[]).expect("Defaults should load");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("my_jwt_secret_key"));
    }
}
