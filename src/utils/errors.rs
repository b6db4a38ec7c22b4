//! Error handling for BoostBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

use crate::models::challenge::RequestStatus;

/// Main error type for BoostBuddy application
#[derive(Error, Debug)]
pub enum BoostBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Challenge request not found: {request_id}")]
    RequestNotFound { request_id: i64 },

    #[error("Invalid state transition for request {request_id}: already {status}")]
    InvalidTransition {
        request_id: i64,
        status: RequestStatus,
    },

    #[error("Notification delivery failed: {0}")]
    Delivery(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for BoostBuddy operations
pub type Result<T> = std::result::Result<T, BoostBuddyError>;

impl BoostBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            BoostBuddyError::Database(_) => false,
            BoostBuddyError::Migration(_) => false,
            BoostBuddyError::Telegram(_) => true,
            BoostBuddyError::Config(_) => false,
            BoostBuddyError::Validation(_) => false,
            BoostBuddyError::UserNotFound { .. } => false,
            BoostBuddyError::RequestNotFound { .. } => false,
            BoostBuddyError::InvalidTransition { .. } => false,
            BoostBuddyError::Delivery(_) => true,
            BoostBuddyError::Serialization(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BoostBuddyError::Database(_) => ErrorSeverity::Critical,
            BoostBuddyError::Migration(_) => ErrorSeverity::Critical,
            BoostBuddyError::Config(_) => ErrorSeverity::Critical,
            BoostBuddyError::Validation(_) => ErrorSeverity::Info,
            BoostBuddyError::UserNotFound { .. } => ErrorSeverity::Info,
            BoostBuddyError::RequestNotFound { .. } => ErrorSeverity::Info,
            BoostBuddyError::InvalidTransition { .. } => ErrorSeverity::Warning,
            BoostBuddyError::Delivery(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
