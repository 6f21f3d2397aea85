//! Configuration management for SafeHaven
//!
//! Handles environment variables and application settings.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::logging::LogFormat;
use crate::models::alert_session::{DEFAULT_COUNTDOWN_SECONDS, MAX_COUNTDOWN_SECONDS};
use crate::services::alert_controller::{AlertSettings, CountdownCancelNotice};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Log level
    pub log_level: String,

    pub log_format: LogFormat,

    /// CORS origins (empty means allow all)
    pub cors_origins: Vec<String>,

    /// Grace period between an SOS press and activation, in seconds
    pub countdown_seconds: u32,

    /// Countdown tick interval in milliseconds
    pub tick_interval_ms: u64,

    /// Notice sent when a countdown is cancelled before activation
    pub cancel_notice: CountdownCancelNotice,

    /// Notifications kept for `GET /api/notifications`
    pub notification_history: usize,

    /// Buffered notifications per WebSocket subscriber
    pub broadcast_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            cors_origins: vec![],
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            tick_interval_ms: 1000,
            cancel_notice: CountdownCancelNotice::Deactivated,
            notification_history: 50,
            broadcast_capacity: 100,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup; `from_env` uses the process
    /// environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Server configuration
        if let Some(host) = lookup("SAFEHAVEN_HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("SAFEHAVEN_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }

        // Environment
        if let Some(environment) = lookup("SAFEHAVEN_ENVIRONMENT") {
            config.environment = environment;
        }

        // Logging
        if let Some(log_level) = lookup("SAFEHAVEN_LOG_LEVEL") {
            config.log_level = log_level;
        }

        if let Some(log_format) = lookup("SAFEHAVEN_LOG_FORMAT") {
            config.log_format = LogFormat::from_str(&log_format)
                .map_err(|_| ConfigError::InvalidLogFormat(log_format))?;
        }

        // CORS origins
        if let Some(cors_origins) = lookup("SAFEHAVEN_CORS_ORIGINS") {
            config.cors_origins = cors_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // SOS countdown
        if let Some(seconds) = lookup("SAFEHAVEN_COUNTDOWN_SECONDS") {
            config.countdown_seconds = seconds
                .parse()
                .map_err(|_| ConfigError::InvalidCountdown(seconds))?;
        }

        if let Some(interval) = lookup("SAFEHAVEN_TICK_INTERVAL_MS") {
            config.tick_interval_ms = interval
                .parse()
                .map_err(|_| ConfigError::InvalidTickInterval(interval))?;
        }

        if let Some(notice) = lookup("SAFEHAVEN_CANCEL_NOTICE") {
            config.cancel_notice = CountdownCancelNotice::from_str(&notice)
                .map_err(|_| ConfigError::InvalidCancelNotice(notice))?;
        }

        // Notifications
        if let Some(history) = lookup("SAFEHAVEN_NOTIFICATION_HISTORY") {
            config.notification_history = history
                .parse()
                .map_err(|_| ConfigError::InvalidNotificationHistory(history))?;
        }

        if let Some(capacity) = lookup("SAFEHAVEN_BROADCAST_CAPACITY") {
            config.broadcast_capacity = capacity
                .parse()
                .map_err(|_| ConfigError::InvalidBroadcastCapacity(capacity))?;
        }

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port.to_string()));
        }

        if let Some(origin) = self
            .cors_origins
            .iter()
            .find(|origin| axum::http::HeaderValue::from_str(origin).is_err())
        {
            return Err(ConfigError::InvalidCorsOrigin(origin.clone()));
        }

        if self.countdown_seconds == 0 || self.countdown_seconds > MAX_COUNTDOWN_SECONDS {
            return Err(ConfigError::InvalidCountdown(
                self.countdown_seconds.to_string(),
            ));
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval(
                self.tick_interval_ms.to_string(),
            ));
        }

        if self.broadcast_capacity == 0 {
            return Err(ConfigError::InvalidBroadcastCapacity(
                self.broadcast_capacity.to_string(),
            ));
        }

        Ok(())
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for the SOS alert controller
    pub fn alert_settings(&self) -> AlertSettings {
        AlertSettings {
            countdown_seconds: self.countdown_seconds,
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            cancel_notice: self.cancel_notice,
        }
    }

    /// Log configuration
    pub fn log_config(&self) {
        info!("Configuration loaded:");
        info!("  Environment: {}", self.environment);
        info!("  Bind address: {}", self.bind_address());
        info!("  Log level: {} ({})", self.log_level, self.log_format);
        info!("  CORS origins: {:?}", self.cors_origins);
        info!("  SOS countdown: {}s", self.countdown_seconds);
        info!("  Tick interval: {}ms", self.tick_interval_ms);
        info!("  Countdown cancel notice: {}", self.cancel_notice);
        info!("  Notification history: {}", self.notification_history);
        info!("  Broadcast capacity: {}", self.broadcast_capacity);
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),

    #[error("Invalid log format: {0} (expected pretty or json)")]
    InvalidLogFormat(String),

    #[error("Invalid SOS countdown: {0} (expected 1-60 seconds)")]
    InvalidCountdown(String),

    #[error("Invalid tick interval: {0}")]
    InvalidTickInterval(String),

    #[error("Invalid countdown cancel notice: {0} (expected deactivated or countdown-cancelled)")]
    InvalidCancelNotice(String),

    #[error("Invalid notification history size: {0}")]
    InvalidNotificationHistory(String),

    #[error("Invalid broadcast capacity: {0}")]
    InvalidBroadcastCapacity(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.countdown_seconds, 3);
        assert_eq!(config.cancel_notice, CountdownCancelNotice::Deactivated);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.port = 0;
        assert!(config.validate().is_err());
        config.port = 3000;

        config.countdown_seconds = 0;
        assert!(config.validate().is_err());
        config.countdown_seconds = 61;
        assert!(config.validate().is_err());
        config.countdown_seconds = 5;
        assert!(config.validate().is_ok());

        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_loading_from_lookup() {
        let config = load(&[
            ("SAFEHAVEN_PORT", "8080"),
            ("SAFEHAVEN_LOG_FORMAT", "json"),
            ("SAFEHAVEN_CORS_ORIGINS", "https://a.example, ,https://b.example"),
            ("SAFEHAVEN_COUNTDOWN_SECONDS", "5"),
            ("SAFEHAVEN_CANCEL_NOTICE", "countdown-cancelled"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.countdown_seconds, 5);
        assert_eq!(config.cancel_notice, CountdownCancelNotice::CountdownCancelled);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            load(&[("SAFEHAVEN_PORT", "http")]),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            load(&[("SAFEHAVEN_COUNTDOWN_SECONDS", "0")]),
            Err(ConfigError::InvalidCountdown(_))
        ));
        assert!(matches!(
            load(&[("SAFEHAVEN_CANCEL_NOTICE", "silent")]),
            Err(ConfigError::InvalidCancelNotice(_))
        ));
    }

    #[test]
    fn test_alert_settings() {
        let settings = load(&[("SAFEHAVEN_TICK_INTERVAL_MS", "250")])
            .unwrap()
            .alert_settings();

        assert_eq!(settings.countdown_seconds, 3);
        assert_eq!(settings.tick_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_helper_methods() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }
}
