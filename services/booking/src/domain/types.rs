use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use stayline_domain::booking::BookingStatus;
use stayline_domain::events::EmailDraft;
use stayline_domain::payment::PaymentStatus;
use stayline_domain::user::UserRole;

/// Authenticated caller, decoded from the gateway identity headers.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub id: Uuid,
    pub role: UserRole,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// True when the caller is `user_id` or an admin.
    pub fn is_self_or_admin(&self, user_id: Uuid) -> bool {
        self.id == user_id || self.is_admin()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub nightly_rate_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Date window during which a property accepts bookings (inclusive bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityPeriod {
    pub id: Uuid,
    pub property_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub property_id: Uuid,
    pub status: BookingStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount_cents: i64,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `kind` stays a free string at this layer; the dispatcher emits
/// `info | success | warning | error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Booking with its property and the two involved users eager-loaded.
#[derive(Debug, Clone)]
pub struct BookingDetail {
    pub booking: Booking,
    pub property: Property,
    pub guest: User,
    pub owner: User,
}

/// Payment with its booking chain eager-loaded.
#[derive(Debug, Clone)]
pub struct PaymentDetail {
    pub payment: Payment,
    pub booking: Booking,
    pub property: Property,
    pub guest: User,
    pub owner: User,
}

/// Durable side-effect row delivered asynchronously by the outbox worker.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub next_attempt_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub failed_at: Option<DateTime<Utc>>,
}

impl OutboxEvent {
    /// Enqueueable email event, due immediately.
    pub fn email(draft: &EmailDraft, idempotency_key: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            kind: "email".to_owned(),
            payload: serde_json::json!({
                "to": draft.to,
                "subject": draft.subject,
                "body": draft.body,
            }),
            idempotency_key,
            attempts: 0,
            last_error: None,
            created_at: now,
            next_attempt_at: now,
            processed_at: None,
            failed_at: None,
        }
    }
}

/// Number of nights in the stay, or `None` when the range is not at least
/// one night long.
pub fn stay_nights(start: NaiveDate, end: NaiveDate) -> Option<i64> {
    let nights = (end - start).num_days();
    (nights >= 1).then_some(nights)
}

/// True when the whole stay falls inside a single availability period.
pub fn covered_by_periods(
    start: NaiveDate,
    end: NaiveDate,
    periods: &[AvailabilityPeriod],
) -> bool {
    periods
        .iter()
        .any(|p| p.start_date <= start && end <= p.end_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(start: NaiveDate, end: NaiveDate) -> AvailabilityPeriod {
        AvailabilityPeriod {
            id: Uuid::now_v7(),
            property_id: Uuid::now_v7(),
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn should_count_nights_for_valid_stay() {
        assert_eq!(stay_nights(date(2026, 5, 1), date(2026, 5, 4)), Some(3));
        assert_eq!(stay_nights(date(2026, 5, 1), date(2026, 5, 2)), Some(1));
    }

    #[test]
    fn should_reject_zero_or_negative_night_stay() {
        assert_eq!(stay_nights(date(2026, 5, 1), date(2026, 5, 1)), None);
        assert_eq!(stay_nights(date(2026, 5, 4), date(2026, 5, 1)), None);
    }

    #[test]
    fn should_accept_stay_inside_one_period() {
        let periods = [period(date(2026, 5, 1), date(2026, 5, 31))];
        assert!(covered_by_periods(
            date(2026, 5, 10),
            date(2026, 5, 12),
            &periods
        ));
        assert!(covered_by_periods(
            date(2026, 5, 1),
            date(2026, 5, 31),
            &periods
        ));
    }

    #[test]
    fn should_reject_stay_spanning_two_periods() {
        let periods = [
            period(date(2026, 5, 1), date(2026, 5, 10)),
            period(date(2026, 5, 11), date(2026, 5, 20)),
        ];
        assert!(!covered_by_periods(
            date(2026, 5, 8),
            date(2026, 5, 13),
            &periods
        ));
    }

    #[test]
    fn should_reject_stay_with_no_periods() {
        assert!(!covered_by_periods(date(2026, 5, 1), date(2026, 5, 2), &[]));
    }

    #[test]
    fn should_build_email_outbox_event_due_immediately() {
        let draft = EmailDraft {
            to: "owner@example.com".into(),
            subject: "New Booking".into(),
            body: "Your property Sea Loft has been booked.".into(),
        };
        let event = OutboxEvent::email(&draft, "booking:abc:created".into());
        assert_eq!(event.kind, "email");
        assert_eq!(event.attempts, 0);
        assert_eq!(event.payload["to"], "owner@example.com");
        assert_eq!(event.payload["subject"], "New Booking");
        assert!(event.processed_at.is_none());
        assert!(event.next_attempt_at <= Utc::now());
    }

    #[test]
    fn should_recognize_admin_callers() {
        let admin = Caller {
            id: Uuid::now_v7(),
            role: UserRole::Admin,
        };
        let guest = Caller {
            id: Uuid::now_v7(),
            role: UserRole::Guest,
        };
        assert!(admin.is_self_or_admin(guest.id));
        assert!(guest.is_self_or_admin(guest.id));
        assert!(!guest.is_self_or_admin(admin.id));
    }
}
