//! Challenge request service implementation
//!
//! This service governs the challenge request lifecycle: creation into the
//! pending state, read-only listing, and the single resolution transition
//! with its point-credit side effect.

use tracing::{debug, info};

use crate::database::repositories::{ChallengeRepository, UserRepository};
use crate::models::challenge::{
    Category, ChallengeRequest, CreateChallengeRequest, Decision,
};
use crate::services::notification::templates;
use crate::utils::errors::{BoostBuddyError, Result};

/// Challenge request service for the request state machine
#[derive(Clone)]
pub struct ChallengeService {
    challenge_repository: ChallengeRepository,
    user_repository: UserRepository,
}

impl ChallengeService {
    /// Create a new ChallengeService instance
    pub fn new(
        challenge_repository: ChallengeRepository,
        user_repository: UserRepository,
    ) -> Self {
        Self {
            challenge_repository,
            user_repository,
        }
    }

    /// Submit a new challenge request in the pending state.
    ///
    /// All validation happens before any write; a rejected input leaves no
    /// trace. The stored fields are exactly the submitted ones.
    pub async fn create_request(
        &self,
        requester_id: i64,
        title: String,
        category: Category,
        description: String,
        reward_points: i32,
    ) -> Result<ChallengeRequest> {
        debug!(requester_id = requester_id, "Creating challenge request");

        if title.trim().is_empty() {
            return Err(BoostBuddyError::Validation(
                "Title must not be empty".to_string(),
            ));
        }

        if description.trim().is_empty() {
            return Err(BoostBuddyError::Validation(
                "Description must not be empty".to_string(),
            ));
        }

        if reward_points < 0 {
            return Err(BoostBuddyError::Validation(
                "Reward points must not be negative".to_string(),
            ));
        }

        self.user_repository
            .find_by_id(requester_id)
            .await?
            .ok_or(BoostBuddyError::UserNotFound {
                user_id: requester_id,
            })?;

        let request = self
            .challenge_repository
            .create(CreateChallengeRequest {
                requester_id,
                title,
                category,
                description,
                reward_points,
            })
            .await?;

        info!(
            request_id = request.id,
            requester_id = requester_id,
            category = %request.category,
            reward_points = request.reward_points,
            "Challenge request created"
        );

        Ok(request)
    }

    /// List all challenge requests, newest first. Read-only.
    pub async fn list_requests(&self) -> Result<Vec<ChallengeRequest>> {
        debug!("Listing challenge requests");
        self.challenge_repository.list().await
    }

    /// Get a single challenge request
    pub async fn get_request(&self, request_id: i64) -> Result<ChallengeRequest> {
        self.challenge_repository
            .find_by_id(request_id)
            .await?
            .ok_or(BoostBuddyError::RequestNotFound { request_id })
    }

    /// Resolve a pending request.
    ///
    /// Exactly one resolution wins; any later attempt fails with
    /// `InvalidTransition`, including retries of the same decision. Approval
    /// credits the requester's points (derived from the stored request) and
    /// queues a notification in the same transaction. Rejection only moves
    /// the state.
    pub async fn resolve_request(
        &self,
        request_id: i64,
        resolver_id: i64,
        decision: Decision,
    ) -> Result<ChallengeRequest> {
        debug!(
            request_id = request_id,
            resolver_id = resolver_id,
            decision = %decision,
            "Resolving challenge request"
        );

        self.user_repository
            .find_by_id(resolver_id)
            .await?
            .ok_or(BoostBuddyError::UserNotFound {
                user_id: resolver_id,
            })?;

        let existing = self
            .challenge_repository
            .find_by_id(request_id)
            .await?
            .ok_or(BoostBuddyError::RequestNotFound { request_id })?;

        // Reward amount and title are immutable after creation, so they can
        // be read ahead of the conditional update.
        let notification = match decision {
            Decision::Approved => {
                let requester = self
                    .user_repository
                    .find_by_id(existing.requester_id)
                    .await?
                    .ok_or(BoostBuddyError::UserNotFound {
                        user_id: existing.requester_id,
                    })?;

                Some((
                    requester.telegram_id,
                    templates::render(
                        templates::CHALLENGE_APPROVED,
                        &[
                            ("title", existing.title.as_str()),
                            ("points", &existing.reward_points.to_string()),
                        ],
                    ),
                ))
            }
            Decision::Rejected => None,
        };

        let resolved = self
            .challenge_repository
            .resolve(request_id, resolver_id, decision, notification)
            .await?;

        info!(
            request_id = resolved.id,
            resolver_id = resolver_id,
            status = %resolved.status,
            "Challenge request resolved"
        );

        Ok(resolved)
    }
}
