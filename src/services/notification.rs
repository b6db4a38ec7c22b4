//! Notification dispatcher implementation
//!
//! Delivery is decoupled from the transactions that trigger it: business
//! operations enqueue rows into the notification outbox, and the dispatcher
//! drains the outbox on its own schedule. A failed delivery is retried with
//! exponential backoff until the attempt limit, then abandoned. Nothing in
//! here can roll back a committed business transition.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use teloxide::{prelude::Request, requests::Requester, types::ChatId, Bot};
use tracing::{debug, error, info, warn};

use crate::config::settings::NotificationsConfig;
use crate::database::repositories::OutboxRepository;
use crate::models::notification::OutboxNotification;
use crate::utils::errors::{BoostBuddyError, ErrorSeverity, Result};
use crate::utils::helpers::truncate_text;

/// Hard length limit of the Telegram Bot API for a single message
const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Message templates for outbound notifications
pub mod templates {
    pub const CHALLENGE_APPROVED: &str =
        "Your challenge \"{title}\" was approved! You earned {points} points.";
    pub const ACHIEVEMENT_AWARDED: &str = "You earned a new achievement: {name}";

    /// Substitute `{key}` placeholders in a template
    pub fn render(template: &str, parameters: &[(&str, &str)]) -> String {
        let mut rendered = template.to_string();
        for (key, value) in parameters {
            let placeholder = format!("{{{}}}", key);
            rendered = rendered.replace(&placeholder, value);
        }
        rendered
    }
}

/// Outbound delivery channel seam. The dispatcher only knows how to hand a
/// message to a chat id; the transport behind it is interchangeable.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn deliver(&self, chat_id: i64, message: &str) -> Result<()>;
}

/// Telegram Bot API delivery channel
#[derive(Clone)]
pub struct TelegramChannel {
    bot: Bot,
}

impl TelegramChannel {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    async fn deliver(&self, chat_id: i64, message: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), truncate_text(message, TELEGRAM_MESSAGE_LIMIT))
            .send()
            .await?;

        Ok(())
    }
}

/// Notification dispatcher draining the outbox
#[derive(Clone)]
pub struct NotificationDispatcher {
    outbox: OutboxRepository,
    channel: Arc<dyn NotificationChannel>,
    config: NotificationsConfig,
}

impl NotificationDispatcher {
    /// Create a new NotificationDispatcher instance
    pub fn new(
        outbox: OutboxRepository,
        channel: Arc<dyn NotificationChannel>,
        config: NotificationsConfig,
    ) -> Self {
        Self {
            outbox,
            channel,
            config,
        }
    }

    /// Send a message immediately, outside the outbox.
    ///
    /// Best-effort: a failure is reported to the caller as `Delivery` and is
    /// not retried.
    pub async fn notify(&self, chat_id: i64, message: &str) -> Result<()> {
        if let Err(e) = self.channel.deliver(chat_id, message).await {
            warn!(chat_id = chat_id, error = %e, "Direct notification delivery failed");
            return Err(BoostBuddyError::Delivery(e.to_string()));
        }

        debug!(chat_id = chat_id, "Direct notification delivered");
        Ok(())
    }

    /// Poll the outbox until the task is aborted
    pub async fn run(&self) {
        info!(
            poll_interval_secs = self.config.poll_interval_secs,
            batch_size = self.config.batch_size,
            "Notification dispatcher started"
        );

        let mut interval =
            tokio::time::interval(Duration::from_secs(self.config.poll_interval_secs));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            match self.dispatch_pending().await {
                Ok(0) => {}
                Ok(count) => debug!(count = count, "Outbox dispatch round completed"),
                Err(e) => error!(error = %e, "Outbox dispatch round failed"),
            }
        }
    }

    /// Deliver one batch of due notifications.
    ///
    /// Deliveries within a batch run concurrently; no ordering is guaranteed
    /// between unrelated messages. Returns how many rows were attempted.
    pub async fn dispatch_pending(&self) -> Result<usize> {
        let batch = self.outbox.due(self.config.batch_size).await?;
        if batch.is_empty() {
            return Ok(0);
        }

        let count = batch.len();
        let deliveries = batch.into_iter().map(|n| self.dispatch_one(n));
        futures::future::join_all(deliveries).await;

        Ok(count)
    }

    async fn dispatch_one(&self, notification: OutboxNotification) {
        match self
            .channel
            .deliver(notification.chat_id, &notification.message)
            .await
        {
            Ok(()) => {
                info!(
                    notification_id = notification.id,
                    chat_id = notification.chat_id,
                    "Notification delivered"
                );
                if let Err(e) = self.outbox.mark_sent(notification.id).await {
                    error!(notification_id = notification.id, error = %e, "Failed to mark notification sent");
                }
            }
            Err(e) => {
                let attempts = notification.attempts + 1;
                match e.severity() {
                    ErrorSeverity::Error | ErrorSeverity::Critical => error!(
                        notification_id = notification.id,
                        attempts = attempts,
                        error = %e,
                        "Notification delivery failed"
                    ),
                    _ => warn!(
                        notification_id = notification.id,
                        attempts = attempts,
                        error = %e,
                        "Notification delivery failed"
                    ),
                }

                let outcome = if !e.is_recoverable() {
                    error!(
                        notification_id = notification.id,
                        "Notification abandoned: delivery error is not retryable"
                    );
                    self.outbox.mark_failed(notification.id, attempts).await
                } else if attempts >= self.config.max_attempts {
                    error!(
                        notification_id = notification.id,
                        "Notification abandoned after exhausting delivery attempts"
                    );
                    self.outbox.mark_failed(notification.id, attempts).await
                } else {
                    let delay =
                        retry_delay(attempts, Duration::from_secs(self.config.retry_base_secs));
                    let next_attempt_at =
                        Utc::now() + chrono::Duration::milliseconds(delay.as_millis() as i64);
                    self.outbox
                        .schedule_retry(notification.id, attempts, next_attempt_at)
                        .await
                };

                if let Err(e) = outcome {
                    error!(notification_id = notification.id, error = %e, "Failed to reschedule notification");
                }
            }
        }
    }
}

/// Exponential backoff with up to a second of jitter. The exponent is capped
/// so the delay stays bounded however many attempts accumulate.
fn retry_delay(attempts: i32, base: Duration) -> Duration {
    let exponent = (attempts - 1).clamp(0, 6) as u32;
    let jitter_ms = rand::thread_rng().gen_range(0..1000);
    base * 2u32.pow(exponent) + Duration::from_millis(jitter_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_placeholders() {
        let message = templates::render(
            templates::CHALLENGE_APPROVED,
            &[("title", "Ship v2"), ("points", "50")],
        );
        assert_eq!(
            message,
            "Your challenge \"Ship v2\" was approved! You earned 50 points."
        );
    }

    #[test]
    fn test_render_achievement_message() {
        let message = templates::render(templates::ACHIEVEMENT_AWARDED, &[("name", "Team Player")]);
        assert_eq!(message, "You earned a new achievement: Team Player");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let message = templates::render("Hello {name}", &[("other", "x")]);
        assert_eq!(message, "Hello {name}");
    }

    #[test]
    fn test_retry_delay_grows_and_stays_bounded() {
        let base = Duration::from_secs(30);

        let first = retry_delay(1, base);
        assert!(first >= base);
        assert!(first < base + Duration::from_secs(1));

        let third = retry_delay(3, base);
        assert!(third >= base * 4);

        // Far past the cap the delay no longer grows
        let capped = retry_delay(50, base);
        assert!(capped < base * 64 + Duration::from_secs(1));
    }
}
