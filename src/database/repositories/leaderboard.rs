//! Leaderboard repository implementation

use sqlx::PgPool;

use crate::models::leaderboard::LeaderboardEntry;
use crate::utils::errors::BoostBuddyError;

#[derive(Debug, Clone)]
pub struct LeaderboardRepository {
    pool: PgPool,
}

impl LeaderboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Recompute the full leaderboard from approved challenge requests.
    ///
    /// Totals are derived at read time; there is no stored counter that
    /// could drift from the request table. Ties rank by user creation order.
    pub async fn compute(&self) -> Result<Vec<LeaderboardEntry>, BoostBuddyError> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT u.display_name AS username,
                   COALESCE(SUM(cr.reward_points), 0) AS total_points
            FROM users u
            LEFT JOIN challenge_requests cr
                ON cr.requester_id = u.id AND cr.status = 'approved'
            GROUP BY u.id, u.display_name
            ORDER BY total_points DESC, u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
