//! Challenge request repository implementation

use chrono::Utc;
use sqlx::PgPool;

use super::outbox::OutboxRepository;
use crate::models::challenge::{ChallengeRequest, CreateChallengeRequest, Decision, RequestStatus};
use crate::utils::errors::BoostBuddyError;

const REQUEST_COLUMNS: &str = "id, requester_id, title, category, description, reward_points, \
                               status, created_at, resolved_at, resolver_id";

#[derive(Debug, Clone)]
pub struct ChallengeRepository {
    pool: PgPool,
}

impl ChallengeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new challenge request in the pending state
    pub async fn create(
        &self,
        request: CreateChallengeRequest,
    ) -> Result<ChallengeRequest, BoostBuddyError> {
        let created = sqlx::query_as::<_, ChallengeRequest>(&format!(
            r#"
            INSERT INTO challenge_requests
                (requester_id, title, category, description, reward_points, status, created_at)
            VALUES ($1, $2, $3, $4, $5, 'pending', $6)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(request.requester_id)
        .bind(request.title)
        .bind(request.category)
        .bind(request.description)
        .bind(request.reward_points)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find challenge request by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ChallengeRequest>, BoostBuddyError> {
        let request = sqlx::query_as::<_, ChallengeRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM challenge_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// List all challenge requests, newest first
    pub async fn list(&self) -> Result<Vec<ChallengeRequest>, BoostBuddyError> {
        let requests = sqlx::query_as::<_, ChallengeRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM challenge_requests ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Resolve a pending request, atomically with its notification.
    ///
    /// The update is conditioned on the current status, so concurrent
    /// resolution attempts serialize on the row: exactly one transitions it,
    /// every other caller gets `InvalidTransition`. For approvals the caller
    /// passes the credit notification, which is enqueued in the same
    /// transaction; either everything commits or nothing does.
    pub async fn resolve(
        &self,
        request_id: i64,
        resolver_id: i64,
        decision: Decision,
        notification: Option<(i64, String)>,
    ) -> Result<ChallengeRequest, BoostBuddyError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, ChallengeRequest>(&format!(
            r#"
            UPDATE challenge_requests
            SET status = $2, resolved_at = $3, resolver_id = $4
            WHERE id = $1 AND status = 'pending'
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(request_id)
        .bind(decision.target_status())
        .bind(Utc::now())
        .bind(resolver_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(request) = updated else {
            // Nothing matched: either the request does not exist, or it has
            // already left the pending state.
            let status = sqlx::query_scalar::<_, RequestStatus>(
                "SELECT status FROM challenge_requests WHERE id = $1",
            )
            .bind(request_id)
            .fetch_optional(&mut *tx)
            .await?;

            tx.rollback().await?;

            return Err(match status {
                None => BoostBuddyError::RequestNotFound { request_id },
                Some(status) => BoostBuddyError::InvalidTransition { request_id, status },
            });
        };

        if let Some((chat_id, message)) = notification {
            OutboxRepository::enqueue_in_tx(&mut tx, chat_id, &message).await?;
        }

        tx.commit().await?;

        Ok(request)
    }
}
