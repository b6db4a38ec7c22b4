//! Achievement model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single awarded achievement. The ledger is append-only and repeat awards
/// of the same name to the same user are permitted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AchievementRecord {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub awarded_at: DateTime<Utc>,
}
