//! Notification fan-out composition.
//!
//! Every mutation in the booking workflow produces one or more notifications
//! (and sometimes an email) for the guest and the property owner. The message
//! text and kind per event live here, in one place, so the lifecycle usecases
//! dispatch uniformly instead of rebuilding the same drafts at each call site.

use uuid::Uuid;

use crate::notification::NotificationKind;

/// A notification to be persisted: recipient + message + kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub user_id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
}

/// An email to be enqueued for asynchronous delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// The guest and owner involved in a booking or payment event.
#[derive(Debug, Clone, Copy)]
pub struct Participants {
    pub guest_id: Uuid,
    pub owner_id: Uuid,
}

/// Format integer cents as a dollar amount for notification text.
fn fmt_amount(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

// ── Booking lifecycle events ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingEvent {
    Created,
    Updated,
    Approved,
    Rejected,
    Paid,
    Cancelled,
}

impl BookingEvent {
    /// Notifications produced by this event, in dispatch order.
    pub fn notifications(self, property_name: &str, who: &Participants) -> Vec<NotificationDraft> {
        match self {
            Self::Created => vec![
                NotificationDraft {
                    user_id: who.owner_id,
                    message: format!("Your property '{property_name}' has been booked."),
                    kind: NotificationKind::Info,
                },
                NotificationDraft {
                    user_id: who.guest_id,
                    message: format!("Your booking for '{property_name}' has been created!"),
                    kind: NotificationKind::Success,
                },
            ],
            Self::Updated => vec![
                NotificationDraft {
                    user_id: who.guest_id,
                    message: format!("Your booking for '{property_name}' has been updated."),
                    kind: NotificationKind::Info,
                },
                NotificationDraft {
                    user_id: who.owner_id,
                    message: format!("A guest updated their booking for '{property_name}'."),
                    kind: NotificationKind::Info,
                },
            ],
            Self::Approved => vec![
                NotificationDraft {
                    user_id: who.guest_id,
                    message: format!(
                        "Your booking for '{property_name}' has been approved by the owner!"
                    ),
                    kind: NotificationKind::Success,
                },
                NotificationDraft {
                    user_id: who.owner_id,
                    message: format!("You have approved a booking for '{property_name}'."),
                    kind: NotificationKind::Success,
                },
            ],
            Self::Rejected => vec![
                NotificationDraft {
                    user_id: who.guest_id,
                    message: format!(
                        "Your booking for '{property_name}' was rejected by the owner."
                    ),
                    kind: NotificationKind::Error,
                },
                NotificationDraft {
                    user_id: who.owner_id,
                    message: format!("You have rejected a booking for '{property_name}'."),
                    kind: NotificationKind::Info,
                },
            ],
            // The paid flow keeps its legacy three-notification contract:
            // guest success, owner success, guest info.
            Self::Paid => vec![
                NotificationDraft {
                    user_id: who.guest_id,
                    message: format!(
                        "Your payment for '{property_name}' was successful. Booking confirmed!"
                    ),
                    kind: NotificationKind::Success,
                },
                NotificationDraft {
                    user_id: who.owner_id,
                    message: format!("Payment received for booking at '{property_name}'."),
                    kind: NotificationKind::Success,
                },
                NotificationDraft {
                    user_id: who.guest_id,
                    message: format!("Payment for '{property_name}' has been created."),
                    kind: NotificationKind::Info,
                },
            ],
            Self::Cancelled => vec![
                NotificationDraft {
                    user_id: who.guest_id,
                    message: format!("Your booking for '{property_name}' has been cancelled."),
                    kind: NotificationKind::Info,
                },
                NotificationDraft {
                    user_id: who.owner_id,
                    message: format!(
                        "A booking for your property '{property_name}' was cancelled by the guest."
                    ),
                    kind: NotificationKind::Warning,
                },
            ],
        }
    }

    /// Email produced by this event, if any. `Created` mails the owner,
    /// `Approved` mails the guest.
    pub fn email(
        self,
        property_name: &str,
        guest_email: &str,
        owner_email: &str,
    ) -> Option<EmailDraft> {
        match self {
            Self::Created => Some(EmailDraft {
                to: owner_email.to_owned(),
                subject: "New Booking".to_owned(),
                body: format!("Your property {property_name} has been booked."),
            }),
            Self::Approved => Some(EmailDraft {
                to: guest_email.to_owned(),
                subject: "Booking Approved".to_owned(),
                body: format!("Your booking for {property_name} has been approved!"),
            }),
            _ => None,
        }
    }
}

// ── Payment record events ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentEvent {
    Processed {
        amount_cents: i64,
        succeeded: bool,
    },
    /// `recipient` is whoever removed the payment (guest or property owner).
    Cancelled {
        amount_cents: i64,
        recipient: Uuid,
    },
}

impl PaymentEvent {
    pub fn notifications(self, property_name: &str, who: &Participants) -> Vec<NotificationDraft> {
        match self {
            Self::Processed {
                amount_cents,
                succeeded,
            } => {
                let amount = fmt_amount(amount_cents);
                let mut drafts = vec![NotificationDraft {
                    user_id: who.guest_id,
                    message: format!(
                        "Payment of {amount} for '{property_name}' has been processed."
                    ),
                    kind: if succeeded {
                        NotificationKind::Success
                    } else {
                        NotificationKind::Error
                    },
                }];
                if succeeded {
                    drafts.push(NotificationDraft {
                        user_id: who.owner_id,
                        message: format!(
                            "Payment of {amount} received for '{property_name}'."
                        ),
                        kind: NotificationKind::Success,
                    });
                }
                drafts
            }
            Self::Cancelled {
                amount_cents,
                recipient,
            } => vec![NotificationDraft {
                user_id: recipient,
                message: format!(
                    "Payment of {} has been cancelled.",
                    fmt_amount(amount_cents)
                ),
                kind: NotificationKind::Warning,
            }],
        }
    }
}

// ── Property events ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyEvent {
    Created,
    Updated,
    Deleted,
}

impl PropertyEvent {
    pub fn notification(self, property_name: &str, owner_id: Uuid) -> NotificationDraft {
        match self {
            Self::Created => NotificationDraft {
                user_id: owner_id,
                message: format!(
                    "Your property '{property_name}' has been successfully created \
                     and is now available for booking!"
                ),
                kind: NotificationKind::Success,
            },
            Self::Updated => NotificationDraft {
                user_id: owner_id,
                message: format!("Your property '{property_name}' has been successfully updated!"),
                kind: NotificationKind::Info,
            },
            Self::Deleted => NotificationDraft {
                user_id: owner_id,
                message: format!("Your property '{property_name}' has been deleted."),
                kind: NotificationKind::Warning,
            },
        }
    }
}

// ── Account events ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountEvent {
    Registered,
    AdminRegistered,
    ProfileUpdated,
    Blocked,
    Unblocked,
}

impl AccountEvent {
    pub fn notification(self, first_name: &str, user_id: Uuid) -> NotificationDraft {
        match self {
            Self::Registered => NotificationDraft {
                user_id,
                message: format!(
                    "Welcome to Stayline, {first_name}! Your account has been created successfully."
                ),
                kind: NotificationKind::Success,
            },
            Self::AdminRegistered => NotificationDraft {
                user_id,
                message: format!(
                    "Welcome to Stayline Admin, {first_name}! Your admin account has been created."
                ),
                kind: NotificationKind::Success,
            },
            Self::ProfileUpdated => NotificationDraft {
                user_id,
                message: "Your profile has been successfully updated.".to_owned(),
                kind: NotificationKind::Info,
            },
            Self::Blocked => NotificationDraft {
                user_id,
                message: "Your account has been temporarily blocked. \
                          Please contact support for assistance."
                    .to_owned(),
                kind: NotificationKind::Error,
            },
            Self::Unblocked => NotificationDraft {
                user_id,
                message: "Your account has been unblocked. Welcome back to Stayline!".to_owned(),
                kind: NotificationKind::Success,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participants() -> Participants {
        Participants {
            guest_id: Uuid::now_v7(),
            owner_id: Uuid::now_v7(),
        }
    }

    #[test]
    fn created_booking_notifies_owner_then_guest() {
        let who = participants();
        let drafts = BookingEvent::Created.notifications("Sea Loft", &who);
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].user_id, who.owner_id);
        assert_eq!(drafts[0].kind, NotificationKind::Info);
        assert_eq!(drafts[0].message, "Your property 'Sea Loft' has been booked.");
        assert_eq!(drafts[1].user_id, who.guest_id);
        assert_eq!(drafts[1].kind, NotificationKind::Success);
    }

    #[test]
    fn paid_booking_produces_three_notifications() {
        let who = participants();
        let drafts = BookingEvent::Paid.notifications("Sea Loft", &who);
        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[0].user_id, who.guest_id);
        assert_eq!(drafts[0].kind, NotificationKind::Success);
        assert_eq!(drafts[1].user_id, who.owner_id);
        assert_eq!(drafts[1].kind, NotificationKind::Success);
        assert_eq!(drafts[2].user_id, who.guest_id);
        assert_eq!(drafts[2].kind, NotificationKind::Info);
        assert_eq!(
            drafts[2].message,
            "Payment for 'Sea Loft' has been created."
        );
    }

    #[test]
    fn rejected_booking_sends_error_to_guest() {
        let who = participants();
        let drafts = BookingEvent::Rejected.notifications("Sea Loft", &who);
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].user_id, who.guest_id);
        assert_eq!(drafts[0].kind, NotificationKind::Error);
        assert_eq!(drafts[1].kind, NotificationKind::Info);
    }

    #[test]
    fn cancelled_booking_warns_owner() {
        let who = participants();
        let drafts = BookingEvent::Cancelled.notifications("Sea Loft", &who);
        assert_eq!(drafts[1].user_id, who.owner_id);
        assert_eq!(drafts[1].kind, NotificationKind::Warning);
    }

    #[test]
    fn created_booking_emails_owner() {
        let email = BookingEvent::Created
            .email("Sea Loft", "guest@example.com", "owner@example.com")
            .unwrap();
        assert_eq!(email.to, "owner@example.com");
        assert_eq!(email.subject, "New Booking");
        assert_eq!(email.body, "Your property Sea Loft has been booked.");
    }

    #[test]
    fn approved_booking_emails_guest() {
        let email = BookingEvent::Approved
            .email("Sea Loft", "guest@example.com", "owner@example.com")
            .unwrap();
        assert_eq!(email.to, "guest@example.com");
        assert_eq!(email.subject, "Booking Approved");
    }

    #[test]
    fn update_reject_cancel_produce_no_email() {
        for event in [
            BookingEvent::Updated,
            BookingEvent::Rejected,
            BookingEvent::Paid,
            BookingEvent::Cancelled,
        ] {
            assert!(event.email("x", "g@x.com", "o@x.com").is_none());
        }
    }

    #[test]
    fn successful_payment_notifies_guest_and_owner() {
        let who = participants();
        let drafts = PaymentEvent::Processed {
            amount_cents: 12_550,
            succeeded: true,
        }
        .notifications("Sea Loft", &who);
        assert_eq!(drafts.len(), 2);
        assert_eq!(
            drafts[0].message,
            "Payment of $125.50 for 'Sea Loft' has been processed."
        );
        assert_eq!(drafts[0].kind, NotificationKind::Success);
        assert_eq!(drafts[1].user_id, who.owner_id);
    }

    #[test]
    fn failed_payment_notifies_guest_only_with_error() {
        let who = participants();
        let drafts = PaymentEvent::Processed {
            amount_cents: 500,
            succeeded: false,
        }
        .notifications("Sea Loft", &who);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].user_id, who.guest_id);
        assert_eq!(drafts[0].kind, NotificationKind::Error);
    }

    #[test]
    fn cancelled_payment_warns_whoever_removed_it() {
        let who = participants();
        let drafts = PaymentEvent::Cancelled {
            amount_cents: 900,
            recipient: who.owner_id,
        }
        .notifications("Sea Loft", &who);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].user_id, who.owner_id);
        assert_eq!(drafts[0].message, "Payment of $9.00 has been cancelled.");
        assert_eq!(drafts[0].kind, NotificationKind::Warning);
    }

    #[test]
    fn property_events_target_owner() {
        let owner = Uuid::now_v7();
        assert_eq!(
            PropertyEvent::Created.notification("Sea Loft", owner).kind,
            NotificationKind::Success
        );
        assert_eq!(
            PropertyEvent::Updated.notification("Sea Loft", owner).kind,
            NotificationKind::Info
        );
        let deleted = PropertyEvent::Deleted.notification("Sea Loft", owner);
        assert_eq!(deleted.kind, NotificationKind::Warning);
        assert_eq!(deleted.user_id, owner);
    }

    #[test]
    fn account_events_cover_block_and_unblock() {
        let user = Uuid::now_v7();
        assert_eq!(
            AccountEvent::Blocked.notification("Ann", user).kind,
            NotificationKind::Error
        );
        assert_eq!(
            AccountEvent::Unblocked.notification("Ann", user).kind,
            NotificationKind::Success
        );
        let welcome = AccountEvent::Registered.notification("Ann", user);
        assert!(welcome.message.contains("Ann"));
    }
}
