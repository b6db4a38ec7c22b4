//! Achievement ledger service implementation
//!
//! Append-only record of awarded achievements. Awards always succeed for a
//! known user; the congratulation message rides the notification outbox and
//! its delivery cannot undo the ledger write.

use tracing::{debug, info};

use crate::database::repositories::{AchievementRepository, UserRepository};
use crate::models::achievement::AchievementRecord;
use crate::services::notification::templates;
use crate::utils::errors::{BoostBuddyError, Result};

/// Achievement service for the append-only award ledger
#[derive(Clone)]
pub struct AchievementService {
    achievement_repository: AchievementRepository,
    user_repository: UserRepository,
}

impl AchievementService {
    /// Create a new AchievementService instance
    pub fn new(
        achievement_repository: AchievementRepository,
        user_repository: UserRepository,
    ) -> Self {
        Self {
            achievement_repository,
            user_repository,
        }
    }

    /// Award an achievement to a user.
    ///
    /// Repeat awards of the same name are allowed; every call appends a new
    /// record.
    pub async fn award_achievement(&self, user_id: i64, name: &str) -> Result<AchievementRecord> {
        debug!(user_id = user_id, name = %name, "Awarding achievement");

        if name.trim().is_empty() {
            return Err(BoostBuddyError::Validation(
                "Achievement name must not be empty".to_string(),
            ));
        }

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(BoostBuddyError::UserNotFound { user_id })?;

        let message = templates::render(templates::ACHIEVEMENT_AWARDED, &[("name", name)]);
        let record = self
            .achievement_repository
            .award(user_id, name, Some((user.telegram_id, message)))
            .await?;

        info!(
            achievement_id = record.id,
            user_id = user_id,
            name = %name,
            "Achievement awarded"
        );

        Ok(record)
    }

    /// List a user's achievements in award order
    pub async fn list_achievements(&self, user_id: i64) -> Result<Vec<AchievementRecord>> {
        debug!(user_id = user_id, "Listing achievements");

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(BoostBuddyError::UserNotFound { user_id })?;

        self.achievement_repository.list_for_user(user_id).await
    }
}
