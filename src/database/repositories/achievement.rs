//! Achievement repository implementation

use chrono::Utc;
use sqlx::PgPool;

use super::outbox::OutboxRepository;
use crate::models::achievement::AchievementRecord;
use crate::utils::errors::BoostBuddyError;

#[derive(Debug, Clone)]
pub struct AchievementRepository {
    pool: PgPool,
}

impl AchievementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an achievement to the ledger, atomically with its notification.
    ///
    /// The ledger write and the outbox row commit together; actual delivery
    /// happens later and cannot undo the award.
    pub async fn award(
        &self,
        user_id: i64,
        name: &str,
        notification: Option<(i64, String)>,
    ) -> Result<AchievementRecord, BoostBuddyError> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, AchievementRecord>(
            r#"
            INSERT INTO achievements (user_id, name, awarded_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, awarded_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        if let Some((chat_id, message)) = notification {
            OutboxRepository::enqueue_in_tx(&mut tx, chat_id, &message).await?;
        }

        tx.commit().await?;

        Ok(record)
    }

    /// List a user's achievements in award order
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<AchievementRecord>, BoostBuddyError> {
        let records = sqlx::query_as::<_, AchievementRecord>(
            "SELECT id, user_id, name, awarded_at FROM achievements WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
