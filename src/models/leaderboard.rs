//! Leaderboard model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One ranked row of the leaderboard. Totals are recomputed from approved
/// challenge requests on every read; there is no stored counter to drift.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeaderboardEntry {
    pub username: String,
    pub total_points: i64,
}
