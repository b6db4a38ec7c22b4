//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{BoostBuddyError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_telegram_config(&settings.telegram)?;
    validate_database_config(&settings.database)?;
    validate_notifications_config(&settings.notifications)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate Telegram configuration
fn validate_telegram_config(config: &super::TelegramConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(BoostBuddyError::Config(
            "Telegram bot token is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(BoostBuddyError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(BoostBuddyError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(BoostBuddyError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate notification outbox configuration
fn validate_notifications_config(config: &super::NotificationsConfig) -> Result<()> {
    if config.poll_interval_secs == 0 {
        return Err(BoostBuddyError::Config(
            "Outbox poll interval must be greater than 0".to_string(),
        ));
    }

    if config.batch_size <= 0 {
        return Err(BoostBuddyError::Config(
            "Outbox batch size must be greater than 0".to_string(),
        ));
    }

    if config.max_attempts <= 0 {
        return Err(BoostBuddyError::Config(
            "Delivery attempt limit must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BoostBuddyError::Config(
            "Logging level is required".to_string(),
        ));
    }

    Ok(())
}
