//! Outbox delivery worker.
//!
//! Domain transactions enqueue rows; this worker polls due rows, hands email
//! payloads to an [`EmailSender`], and records per-row retry state with
//! exponential backoff. Rows that exhaust the attempt cap are marked failed
//! and never retried.

#![allow(async_fn_in_trait)]

use std::time::Duration;

use anyhow::Context as _;
use chrono::Utc;
use serde::Deserialize;

use crate::domain::repository::OutboxRepository;
use crate::domain::types::OutboxEvent;
use crate::error::BookingServiceError;

/// Delivery attempts before a row is marked failed.
pub const MAX_ATTEMPTS: i32 = 5;

/// Rows picked up per poll.
const BATCH_SIZE: u64 = 50;

/// Port for email delivery. SMTP is out of scope; the shipped implementation
/// logs the delivery.
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
        tracing::info!(to, subject, "email delivered");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct EmailPayload {
    to: String,
    subject: String,
    body: String,
}

/// Retry delay after `attempts` failures: 30s doubling per attempt,
/// exponent capped to keep the shift in range.
fn backoff(attempts: i32) -> chrono::Duration {
    chrono::Duration::seconds(30 * (1_i64 << attempts.clamp(0, 10)))
}

async fn deliver<S: EmailSender>(event: &OutboxEvent, sender: &S) -> anyhow::Result<()> {
    match event.kind.as_str() {
        "email" => {
            let payload: EmailPayload =
                serde_json::from_value(event.payload.clone()).context("decode email payload")?;
            sender
                .send(&payload.to, &payload.subject, &payload.body)
                .await
        }
        other => Err(anyhow::anyhow!("unknown outbox event kind: {other}")),
    }
}

/// One poll: deliver every due row. Returns the number delivered.
pub async fn run_once<R, S>(repo: &R, sender: &S) -> Result<usize, BookingServiceError>
where
    R: OutboxRepository,
    S: EmailSender,
{
    let due = repo.due(Utc::now(), BATCH_SIZE).await?;
    let mut delivered = 0;
    for event in due {
        match deliver(&event, sender).await {
            Ok(()) => {
                repo.mark_processed(event.id, Utc::now()).await?;
                delivered += 1;
            }
            Err(e) => {
                let attempts = event.attempts + 1;
                let failed = attempts >= MAX_ATTEMPTS;
                let next_attempt_at = Utc::now() + backoff(attempts);
                tracing::warn!(
                    event_id = %event.id,
                    attempts,
                    failed,
                    error = %e,
                    "outbox delivery failed"
                );
                repo.mark_attempt_failed(event.id, &e.to_string(), attempts, next_attempt_at, failed)
                    .await?;
            }
        }
    }
    Ok(delivered)
}

/// Poll loop. Spawned once at service startup.
pub async fn run_outbox_worker<R, S>(repo: R, sender: S, poll: Duration)
where
    R: OutboxRepository,
    S: EmailSender,
{
    loop {
        if let Err(e) = run_once(&repo, &sender).await {
            tracing::error!(error = %e, "outbox worker tick failed");
        }
        tokio::time::sleep(poll).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration as ChronoDuration};
    use std::sync::Mutex;
    use uuid::Uuid;

    use stayline_domain::events::EmailDraft;

    struct MockOutboxRepo {
        events: Mutex<Vec<OutboxEvent>>,
    }

    impl MockOutboxRepo {
        fn with(events: Vec<OutboxEvent>) -> Self {
            Self {
                events: Mutex::new(events),
            }
        }

        fn snapshot(&self) -> Vec<OutboxEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl OutboxRepository for MockOutboxRepo {
        async fn due(
            &self,
            now: DateTime<Utc>,
            limit: u64,
        ) -> Result<Vec<OutboxEvent>, BookingServiceError> {
            Ok(self
                .events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| {
                    e.processed_at.is_none() && e.failed_at.is_none() && e.next_attempt_at <= now
                })
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn mark_processed(
            &self,
            id: Uuid,
            now: DateTime<Utc>,
        ) -> Result<(), BookingServiceError> {
            let mut events = self.events.lock().unwrap();
            if let Some(e) = events.iter_mut().find(|e| e.id == id) {
                e.processed_at = Some(now);
            }
            Ok(())
        }

        async fn mark_attempt_failed(
            &self,
            id: Uuid,
            error: &str,
            attempts: i32,
            next_attempt_at: DateTime<Utc>,
            failed: bool,
        ) -> Result<(), BookingServiceError> {
            let mut events = self.events.lock().unwrap();
            if let Some(e) = events.iter_mut().find(|e| e.id == id) {
                e.attempts = attempts;
                e.last_error = Some(error.to_owned());
                e.next_attempt_at = next_attempt_at;
                if failed {
                    e.failed_at = Some(Utc::now());
                }
            }
            Ok(())
        }
    }

    struct RecordingSender {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl EmailSender for RecordingSender {
        async fn send(&self, to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_owned(), subject.to_owned()));
            Ok(())
        }
    }

    struct FailingSender;

    impl EmailSender for FailingSender {
        async fn send(&self, _to: &str, _subject: &str, _body: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("smtp unreachable"))
        }
    }

    fn email_event() -> OutboxEvent {
        let draft = EmailDraft {
            to: "owner@example.com".into(),
            subject: "New Booking".into(),
            body: "Your property Sea Loft has been booked.".into(),
        };
        OutboxEvent::email(&draft, Uuid::now_v7().to_string())
    }

    #[tokio::test]
    async fn should_deliver_due_email_and_mark_processed() {
        let repo = MockOutboxRepo::with(vec![email_event()]);
        let sender = RecordingSender {
            sent: Mutex::new(Vec::new()),
        };

        let delivered = run_once(&repo, &sender).await.unwrap();

        assert_eq!(delivered, 1);
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "owner@example.com");
        assert_eq!(sent[0].1, "New Booking");
        assert!(repo.snapshot()[0].processed_at.is_some());
    }

    #[tokio::test]
    async fn should_skip_events_not_yet_due() {
        let mut event = email_event();
        event.next_attempt_at = Utc::now() + ChronoDuration::minutes(10);
        let repo = MockOutboxRepo::with(vec![event]);
        let sender = RecordingSender {
            sent: Mutex::new(Vec::new()),
        };

        let delivered = run_once(&repo, &sender).await.unwrap();

        assert_eq!(delivered, 0);
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_record_failure_with_backoff() {
        let repo = MockOutboxRepo::with(vec![email_event()]);

        let delivered = run_once(&repo, &FailingSender).await.unwrap();

        assert_eq!(delivered, 0);
        let event = &repo.snapshot()[0];
        assert_eq!(event.attempts, 1);
        assert_eq!(event.last_error.as_deref(), Some("smtp unreachable"));
        assert!(event.failed_at.is_none());
        assert!(event.next_attempt_at > Utc::now() + ChronoDuration::seconds(50));
    }

    #[tokio::test]
    async fn should_mark_event_failed_after_attempt_cap() {
        let mut event = email_event();
        event.attempts = MAX_ATTEMPTS - 1;
        let repo = MockOutboxRepo::with(vec![event]);

        run_once(&repo, &FailingSender).await.unwrap();

        let event = &repo.snapshot()[0];
        assert_eq!(event.attempts, MAX_ATTEMPTS);
        assert!(event.failed_at.is_some());
    }

    #[tokio::test]
    async fn should_treat_unknown_kind_as_failure() {
        let mut event = email_event();
        event.kind = "sms".into();
        let repo = MockOutboxRepo::with(vec![event]);
        let sender = RecordingSender {
            sent: Mutex::new(Vec::new()),
        };

        let delivered = run_once(&repo, &sender).await.unwrap();

        assert_eq!(delivered, 0);
        let event = &repo.snapshot()[0];
        assert_eq!(event.attempts, 1);
        assert!(
            event
                .last_error
                .as_deref()
                .unwrap()
                .contains("unknown outbox event kind")
        );
    }

    #[test]
    fn should_double_backoff_per_attempt() {
        assert_eq!(backoff(0), ChronoDuration::seconds(30));
        assert_eq!(backoff(1), ChronoDuration::seconds(60));
        assert_eq!(backoff(2), ChronoDuration::seconds(120));
        // exponent clamped, no overflow on absurd attempt counts
        assert_eq!(backoff(100), backoff(10));
    }
}
