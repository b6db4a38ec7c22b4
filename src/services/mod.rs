//! Services module
//!
//! This module contains business logic services

pub mod achievement;
pub mod challenge;
pub mod leaderboard;
pub mod notification;
pub mod user;

// Re-export commonly used services
pub use achievement::AchievementService;
pub use challenge::ChallengeService;
pub use leaderboard::LeaderboardService;
pub use notification::{NotificationChannel, NotificationDispatcher, TelegramChannel};
pub use user::UserService;

use std::sync::Arc;

use teloxide::Bot;

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub challenge_service: ChallengeService,
    pub achievement_service: AchievementService,
    pub leaderboard_service: LeaderboardService,
    pub notification_dispatcher: NotificationDispatcher,
}

impl ServiceFactory {
    /// Create a new ServiceFactory delivering through the Telegram Bot API
    pub fn new(bot: Bot, settings: Settings, database: DatabaseService) -> Self {
        Self::with_channel(settings, database, Arc::new(TelegramChannel::new(bot)))
    }

    /// Create a ServiceFactory with a custom delivery channel
    pub fn with_channel(
        settings: Settings,
        database: DatabaseService,
        channel: Arc<dyn NotificationChannel>,
    ) -> Self {
        let user_service = UserService::new(database.users.clone());
        let challenge_service =
            ChallengeService::new(database.challenges.clone(), database.users.clone());
        let achievement_service =
            AchievementService::new(database.achievements.clone(), database.users.clone());
        let leaderboard_service = LeaderboardService::new(database.leaderboard.clone());
        let notification_dispatcher =
            NotificationDispatcher::new(database.outbox, channel, settings.notifications);

        Self {
            user_service,
            challenge_service,
            achievement_service,
            leaderboard_service,
            notification_dispatcher,
        }
    }
}
