//! User directory service implementation
//!
//! This service resolves external Telegram identities to internal user
//! records. Users are created on first contact and never deleted.

use tracing::{debug, info, warn};

use crate::database::repositories::UserRepository;
use crate::models::user::{User, UserRole};
use crate::utils::errors::{BoostBuddyError, Result};

/// User service for identity resolution and directory lookups
#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }

    /// Register a user on first contact, or return the existing record.
    ///
    /// Idempotent: calling this twice with the same Telegram id yields the
    /// same internal id, and the stored display name is never overwritten.
    pub async fn ensure_user(&self, telegram_id: i64, display_name: &str) -> Result<User> {
        debug!(telegram_id = telegram_id, "Ensuring user exists");

        let user = self.user_repository.upsert(telegram_id, display_name).await?;
        info!(
            user_id = user.id,
            telegram_id = telegram_id,
            "User resolved"
        );

        Ok(user)
    }

    /// Get user by internal ID
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        debug!(user_id = user_id, "Getting user by ID");

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(BoostBuddyError::UserNotFound { user_id })
    }

    /// Get user by Telegram ID
    pub async fn get_user_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>> {
        debug!(telegram_id = telegram_id, "Getting user by Telegram ID");
        self.user_repository.find_by_telegram_id(telegram_id).await
    }

    /// Change a user's role. Administrative operation, not reachable from
    /// the request lifecycle.
    pub async fn set_role(&self, user_id: i64, role: UserRole) -> Result<User> {
        let user = self
            .user_repository
            .set_role(user_id, role)
            .await?
            .ok_or(BoostBuddyError::UserNotFound { user_id })?;

        warn!(user_id = user.id, role = %role, "User role changed");

        Ok(user)
    }
}
