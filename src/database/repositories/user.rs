//! User repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::user::{User, UserRole};
use crate::utils::errors::BoostBuddyError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user on first contact, or return the existing record.
    ///
    /// The insert races safely against concurrent first contacts: the unique
    /// constraint on telegram_id plus ON CONFLICT DO NOTHING guarantees at
    /// most one row, and the loser falls through to the select. An existing
    /// record is returned unchanged; the display name is not overwritten.
    pub async fn upsert(&self, telegram_id: i64, display_name: &str) -> Result<User, BoostBuddyError> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (telegram_id, display_name, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (telegram_id) DO NOTHING
            RETURNING id, telegram_id, display_name, role, created_at
            "#,
        )
        .bind(telegram_id)
        .bind(display_name)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(user) = inserted {
            return Ok(user);
        }

        // Lost the race or the user already existed; the row is there.
        self.find_by_telegram_id(telegram_id)
            .await?
            .ok_or(BoostBuddyError::Database(sqlx::Error::RowNotFound))
    }

    /// Find user by internal ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, BoostBuddyError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, telegram_id, display_name, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by Telegram ID
    pub async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, BoostBuddyError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, telegram_id, display_name, role, created_at FROM users WHERE telegram_id = $1",
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Change a user's role
    pub async fn set_role(&self, id: i64, role: UserRole) -> Result<Option<User>, BoostBuddyError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $2
            WHERE id = $1
            RETURNING id, telegram_id, display_name, role, created_at
            "#,
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
