//! HTTP server configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Default port of the scheduling API
pub const DEFAULT_PORT: u16 = 8000;

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
}

fn default_true() -> bool {
    true
}

/// Configuration for the HTTP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for API
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Origins allowed by CORS; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Enable request logging
    #[serde(default = "default_true")]
    pub enable_request_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            enable_cors: true,
            allowed_origins: Vec::new(),
            enable_request_logging: true,
        }
    }
}

impl ServerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for origin in &self.allowed_origins {
            let parsed = url::Url::parse(origin).map_err(|e| ConfigError::InvalidValue {
                field: "allowed_origins".to_string(),
                reason: format!("'{origin}': {e}"),
            })?;

            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue {
                    field: "allowed_origins".to_string(),
                    reason: format!("'{origin}' must be an http(s) origin"),
                });
            }
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address.port(), 8000);
        assert!(config.enable_cors);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
bind_address = "127.0.0.1:9000"
enable_request_logging = false
"#,
        )
        .unwrap();

        assert_eq!(config.bind_address.port(), 9000);
        assert!(config.enable_cors);
        assert!(!config.enable_request_logging);
    }

    #[test]
    fn test_origin_validation() {
        let mut config = ServerConfig {
            allowed_origins: vec!["https://talentsync.example.com".to_string()],
            ..ServerConfig::default()
        };
        assert!(config.validate().is_ok());

        config.allowed_origins.push("not an origin".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("allowed_origins"));

        config.allowed_origins = vec!["ftp://files.example.com".to_string()];
        assert!(config.validate().is_err());
    }
}
