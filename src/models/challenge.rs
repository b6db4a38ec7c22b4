//! Challenge request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::BoostBuddyError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChallengeRequest {
    pub id: i64,
    pub requester_id: i64,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub reward_points: i32,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolver_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChallengeRequest {
    pub requester_id: i64,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub reward_points: i32,
}

/// Lifecycle state of a challenge request. Requests start out pending and
/// are resolved exactly once; there is no way back out of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Fixed category set for challenge requests, validated at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum Category {
    #[serde(rename = "IT")]
    It,
    Marketing,
    Design,
    Other,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::It => write!(f, "IT"),
            Category::Marketing => write!(f, "Marketing"),
            Category::Design => write!(f, "Design"),
            Category::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = BoostBuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "it" => Ok(Category::It),
            "marketing" => Ok(Category::Marketing),
            "design" => Ok(Category::Design),
            "other" => Ok(Category::Other),
            other => Err(BoostBuddyError::Validation(format!(
                "Unknown category: {}",
                other
            ))),
        }
    }
}

/// Manager decision on a pending request. Anything outside approve/reject is
/// rejected at parse time, before it can reach the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// The terminal status this decision moves a pending request into.
    pub fn target_status(&self) -> RequestStatus {
        match self {
            Decision::Approved => RequestStatus::Approved,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Approved => write!(f, "approved"),
            Decision::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for Decision {
    type Err = BoostBuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approved" => Ok(Decision::Approved),
            "rejected" => Ok(Decision::Rejected),
            other => Err(BoostBuddyError::Validation(format!(
                "Unknown decision: {}",
                other
            ))),
        }
    }
}
