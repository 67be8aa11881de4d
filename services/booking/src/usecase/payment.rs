use chrono::Utc;
use uuid::Uuid;

use stayline_domain::events::{Participants, PaymentEvent};
use stayline_domain::payment::PaymentStatus;

use crate::domain::repository::{BookingRepository, PaymentRepository};
use crate::domain::types::{Caller, Payment, PaymentDetail};
use crate::error::BookingServiceError;

fn payment_participants(detail: &PaymentDetail) -> Participants {
    Participants {
        guest_id: detail.booking.guest_id,
        owner_id: detail.property.owner_id,
    }
}

/// Only the booking's guest or the property's owner may touch a payment.
fn ensure_party(detail: &PaymentDetail, caller: Caller) -> Result<(), BookingServiceError> {
    if caller.id == detail.booking.guest_id || caller.id == detail.property.owner_id {
        Ok(())
    } else {
        Err(BookingServiceError::Forbidden)
    }
}

// ── CreatePayment ────────────────────────────────────────────────────────────

pub struct CreatePaymentInput {
    pub booking_id: Uuid,
    pub amount_cents: i64,
    /// Defaults to `Success` when the client sends none.
    pub status: Option<PaymentStatus>,
}

pub struct CreatePaymentUseCase<PR, BR>
where
    PR: PaymentRepository,
    BR: BookingRepository,
{
    pub payment_repo: PR,
    pub booking_repo: BR,
}

impl<PR, BR> CreatePaymentUseCase<PR, BR>
where
    PR: PaymentRepository,
    BR: BookingRepository,
{
    pub async fn execute(
        &self,
        caller: Caller,
        input: CreatePaymentInput,
    ) -> Result<PaymentDetail, BookingServiceError> {
        if input.amount_cents <= 0 {
            return Err(BookingServiceError::InvalidAmount);
        }
        let detail = self
            .booking_repo
            .find_detail(input.booking_id)
            .await?
            .ok_or(BookingServiceError::BookingNotFound)?;
        if detail.booking.guest_id != caller.id {
            return Err(BookingServiceError::Forbidden);
        }
        if input.amount_cents > detail.booking.price_cents {
            return Err(BookingServiceError::AmountExceedsPrice);
        }

        let status = input.status.unwrap_or(PaymentStatus::Success);
        let now = Utc::now();
        let payment = Payment {
            id: Uuid::now_v7(),
            booking_id: detail.booking.id,
            amount_cents: input.amount_cents,
            status,
            created_at: now,
            updated_at: now,
        };
        let who = Participants {
            guest_id: detail.booking.guest_id,
            owner_id: detail.property.owner_id,
        };
        let notifications = PaymentEvent::Processed {
            amount_cents: payment.amount_cents,
            succeeded: status == PaymentStatus::Success,
        }
        .notifications(&detail.property.name, &who);
        self.payment_repo
            .create_with_effects(&payment, &notifications)
            .await?;

        Ok(PaymentDetail {
            payment,
            booking: detail.booking,
            property: detail.property,
            guest: detail.guest,
            owner: detail.owner,
        })
    }
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub struct GetPaymentUseCase<PR: PaymentRepository> {
    pub repo: PR,
}

impl<PR: PaymentRepository> GetPaymentUseCase<PR> {
    pub async fn execute(
        &self,
        caller: Caller,
        payment_id: Uuid,
    ) -> Result<PaymentDetail, BookingServiceError> {
        let detail = self
            .repo
            .find_detail(payment_id)
            .await?
            .ok_or(BookingServiceError::PaymentNotFound)?;
        ensure_party(&detail, caller)?;
        Ok(detail)
    }
}

pub struct ListPaymentsUseCase<PR: PaymentRepository> {
    pub repo: PR,
}

impl<PR: PaymentRepository> ListPaymentsUseCase<PR> {
    pub async fn execute(&self, caller: Caller) -> Result<Vec<PaymentDetail>, BookingServiceError> {
        self.repo.list_by_guest(caller.id).await
    }
}

// ── UpdatePayment ────────────────────────────────────────────────────────────

pub struct UpdatePaymentInput {
    pub amount_cents: Option<i64>,
    pub status: Option<PaymentStatus>,
}

pub struct UpdatePaymentUseCase<PR: PaymentRepository> {
    pub repo: PR,
}

impl<PR: PaymentRepository> UpdatePaymentUseCase<PR> {
    pub async fn execute(
        &self,
        caller: Caller,
        payment_id: Uuid,
        input: UpdatePaymentInput,
    ) -> Result<Payment, BookingServiceError> {
        let detail = self
            .repo
            .find_detail(payment_id)
            .await?
            .ok_or(BookingServiceError::PaymentNotFound)?;
        ensure_party(&detail, caller)?;
        if input.amount_cents.is_none() && input.status.is_none() {
            return Err(BookingServiceError::MissingData);
        }

        // Amount bounds are checked at creation only; an update records
        // corrections as-is.
        let mut payment = detail.payment;
        if let Some(amount_cents) = input.amount_cents {
            payment.amount_cents = amount_cents;
        }
        if let Some(status) = input.status {
            payment.status = status;
        }
        payment.updated_at = Utc::now();
        self.repo.update(&payment).await?;
        Ok(payment)
    }
}

// ── DeletePayment ────────────────────────────────────────────────────────────

pub struct DeletePaymentUseCase<PR: PaymentRepository> {
    pub repo: PR,
}

impl<PR: PaymentRepository> DeletePaymentUseCase<PR> {
    pub async fn execute(
        &self,
        caller: Caller,
        payment_id: Uuid,
    ) -> Result<(), BookingServiceError> {
        let detail = self
            .repo
            .find_detail(payment_id)
            .await?
            .ok_or(BookingServiceError::PaymentNotFound)?;
        ensure_party(&detail, caller)?;
        let notifications = PaymentEvent::Cancelled {
            amount_cents: detail.payment.amount_cents,
            recipient: caller.id,
        }
        .notifications(&detail.property.name, &payment_participants(&detail));
        self.repo
            .delete_with_effects(payment_id, &notifications)
            .await
    }
}
