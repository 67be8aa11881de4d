//! Booking status machine.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking.
///
/// Wire format: lowercase string (`pending`, `confirmed`, `paid`, `rejected`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Paid,
    Rejected,
}

impl BookingStatus {
    /// Parse from the stored string value. Returns `None` for unknown values.
    pub fn from_str_value(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "paid" => Some(Self::Paid),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Stored string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }

    /// Transition table. A booking starts `pending`; the owner confirms or
    /// rejects it; a confirmed booking can be paid or still rejected.
    /// `paid` and `rejected` are terminal.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Rejected)
                | (Self::Confirmed, Self::Paid)
                | (Self::Confirmed, Self::Rejected)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_round_trip_status_via_str_value() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Paid,
            BookingStatus::Rejected,
        ] {
            assert_eq!(BookingStatus::from_str_value(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::from_str_value("cancelled"), None);
    }

    #[test]
    fn should_allow_pending_to_confirmed_or_rejected() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Rejected));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Paid));
    }

    #[test]
    fn should_allow_confirmed_to_paid_or_rejected() {
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Paid));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Rejected));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Pending));
    }

    #[test]
    fn should_treat_paid_and_rejected_as_terminal() {
        for next in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Paid,
            BookingStatus::Rejected,
        ] {
            assert!(!BookingStatus::Paid.can_transition_to(next));
            assert!(!BookingStatus::Rejected.can_transition_to(next));
        }
    }

    #[test]
    fn should_serialize_status_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
    }
}
