//! Leaderboard service implementation

use tracing::debug;

use crate::database::repositories::LeaderboardRepository;
use crate::models::leaderboard::LeaderboardEntry;
use crate::utils::errors::Result;

/// Leaderboard service deriving ranked point totals
#[derive(Clone)]
pub struct LeaderboardService {
    leaderboard_repository: LeaderboardRepository,
}

impl LeaderboardService {
    /// Create a new LeaderboardService instance
    pub fn new(leaderboard_repository: LeaderboardRepository) -> Self {
        Self {
            leaderboard_repository,
        }
    }

    /// Recompute the leaderboard from approved requests.
    ///
    /// Descending by total points; ties rank by user creation order, so the
    /// listing is deterministic.
    pub async fn compute_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        debug!("Computing leaderboard");
        self.leaderboard_repository.compute().await
    }
}
