//! Notification outbox repository implementation
//!
//! Outbox rows are enqueued inside the transaction of the operation that
//! triggered them and drained later by the notification dispatcher. Delivery
//! never participates in the enqueueing transaction.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::notification::OutboxNotification;
use crate::utils::errors::BoostBuddyError;

const OUTBOX_COLUMNS: &str =
    "id, chat_id, message, status, attempts, next_attempt_at, created_at, sent_at";

#[derive(Debug, Clone)]
pub struct OutboxRepository {
    pool: PgPool,
}

impl OutboxRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Enqueue a message as part of an open transaction.
    ///
    /// Committing the caller's transaction makes the row visible to the
    /// dispatcher; rolling back drops it with everything else.
    pub async fn enqueue_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        chat_id: i64,
        message: &str,
    ) -> Result<OutboxNotification, BoostBuddyError> {
        let now = Utc::now();
        let notification = sqlx::query_as::<_, OutboxNotification>(&format!(
            r#"
            INSERT INTO notifications (chat_id, message, next_attempt_at, created_at)
            VALUES ($1, $2, $3, $3)
            RETURNING {OUTBOX_COLUMNS}
            "#
        ))
        .bind(chat_id)
        .bind(message)
        .bind(now)
        .fetch_one(&mut **tx)
        .await?;

        Ok(notification)
    }

    /// Fetch pending rows that are due for delivery, oldest first
    pub async fn due(&self, limit: i64) -> Result<Vec<OutboxNotification>, BoostBuddyError> {
        let notifications = sqlx::query_as::<_, OutboxNotification>(&format!(
            r#"
            SELECT {OUTBOX_COLUMNS}
            FROM notifications
            WHERE status = 'pending' AND next_attempt_at <= $1
            ORDER BY id
            LIMIT $2
            "#
        ))
        .bind(Utc::now())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Mark a row as delivered
    pub async fn mark_sent(&self, id: i64) -> Result<(), BoostBuddyError> {
        sqlx::query("UPDATE notifications SET status = 'sent', sent_at = $2 WHERE id = $1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Record a failed attempt and schedule the next one
    pub async fn schedule_retry(
        &self,
        id: i64,
        attempts: i32,
        next_attempt_at: DateTime<Utc>,
    ) -> Result<(), BoostBuddyError> {
        sqlx::query("UPDATE notifications SET attempts = $2, next_attempt_at = $3 WHERE id = $1")
            .bind(id)
            .bind(attempts)
            .bind(next_attempt_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Give up on a row after exhausting its delivery attempts
    pub async fn mark_failed(&self, id: i64, attempts: i32) -> Result<(), BoostBuddyError> {
        sqlx::query("UPDATE notifications SET status = 'failed', attempts = $2 WHERE id = $1")
            .bind(id)
            .bind(attempts)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
