//! Shared test infrastructure
//!
//! Integration tests run against a real PostgreSQL database named by the
//! `BOOSTBUDDY_TEST_DATABASE_URL` environment variable. When the variable is
//! unset the tests skip themselves, so the unit suite stays runnable without
//! infrastructure. Notification delivery goes through a recording mock
//! channel instead of the Telegram API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::PgPool;

use BoostBuddy::config::settings::{NotificationsConfig, Settings};
use BoostBuddy::database::DatabaseService;
use BoostBuddy::services::{NotificationChannel, ServiceFactory};
use BoostBuddy::utils::errors::{BoostBuddyError, Result};

pub const TEST_DATABASE_ENV: &str = "BOOSTBUDDY_TEST_DATABASE_URL";

/// Delivery channel double that records messages and can be told to fail
#[derive(Default)]
pub struct MockChannel {
    fail: AtomicBool,
    delivered: Mutex<Vec<(i64, String)>>,
}

impl MockChannel {
    /// Make every subsequent delivery fail (or succeed again)
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Messages delivered so far, in delivery order
    pub fn delivered(&self) -> Vec<(i64, String)> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationChannel for MockChannel {
    async fn deliver(&self, chat_id: i64, message: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BoostBuddyError::Delivery("channel unreachable".to_string()));
        }

        self.delivered
            .lock()
            .unwrap()
            .push((chat_id, message.to_string()));
        Ok(())
    }
}

/// Settings tuned for tests: immediate redelivery, few attempts
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.telegram.token = "12345:test_token".to_string();
    settings.notifications = NotificationsConfig {
        poll_interval_secs: 1,
        batch_size: 20,
        max_attempts: 3,
        retry_base_secs: 0,
    };
    settings
}

/// Integration test context: a migrated, truncated database plus the full
/// service stack wired to a [`MockChannel`].
pub struct TestContext {
    pub pool: PgPool,
    pub services: ServiceFactory,
    pub channel: Arc<MockChannel>,
}

impl TestContext {
    /// Connect to the test database, run migrations, and reset all tables.
    ///
    /// Returns `None` when `BOOSTBUDDY_TEST_DATABASE_URL` is unset so the
    /// caller can skip gracefully.
    pub async fn new() -> Option<TestContext> {
        let url = std::env::var(TEST_DATABASE_ENV).ok()?;

        let pool = PgPool::connect(&url)
            .await
            .expect("failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");

        sqlx::query(
            "TRUNCATE notifications, achievements, challenge_requests, users RESTART IDENTITY CASCADE",
        )
        .execute(&pool)
        .await
        .expect("failed to reset test database");

        let channel = Arc::new(MockChannel::default());
        let database = DatabaseService::new(pool.clone());
        let services = ServiceFactory::with_channel(test_settings(), database, channel.clone());

        Some(TestContext {
            pool,
            services,
            channel,
        })
    }

    /// Count rows in a table
    pub async fn count_rows(&self, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("failed to count rows");
        count
    }
}

/// Print the standard skip notice for DB-backed tests
pub fn skip_notice(test: &str) {
    eprintln!("skipping {}: {} not set", test, TEST_DATABASE_ENV);
}
