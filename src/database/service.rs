//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{
    AchievementRepository, ChallengeRepository, DatabasePool, LeaderboardRepository,
    OutboxRepository, UserRepository,
};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub challenges: ChallengeRepository,
    pub achievements: AchievementRepository,
    pub leaderboard: LeaderboardRepository,
    pub outbox: OutboxRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            challenges: ChallengeRepository::new(pool.clone()),
            achievements: AchievementRepository::new(pool.clone()),
            leaderboard: LeaderboardRepository::new(pool.clone()),
            outbox: OutboxRepository::new(pool),
        }
    }
}
