//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub telegram: TelegramConfig,
    pub database: DatabaseConfig,
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
}

/// Telegram delivery channel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    pub token: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Notification outbox configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationsConfig {
    /// Seconds between outbox polls
    pub poll_interval_secs: u64,
    /// Rows claimed per dispatch round
    pub batch_size: i64,
    /// Delivery attempts before a row is marked failed
    pub max_attempts: i32,
    /// Base delay for the exponential redelivery backoff
    pub retry_base_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("BOOSTBUDDY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::BoostBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig {
                token: String::new(),
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/boostbuddy".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            notifications: NotificationsConfig {
                poll_interval_secs: 5,
                batch_size: 20,
                max_attempts: 5,
                retry_base_secs: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/boostbuddy".to_string(),
            },
        }
    }
}
