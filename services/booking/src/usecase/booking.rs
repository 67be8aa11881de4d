use anyhow::anyhow;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use stayline_domain::booking::BookingStatus;
use stayline_domain::events::{BookingEvent, Participants};
use stayline_domain::user::UserRole;

use crate::domain::repository::{BookingRepository, PropertyRepository, UserRepository};
use crate::domain::types::{
    Booking, BookingDetail, Caller, OutboxEvent, covered_by_periods, stay_nights,
};
use crate::error::BookingServiceError;

fn ensure_transition(
    current: BookingStatus,
    next: BookingStatus,
) -> Result<(), BookingServiceError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(BookingServiceError::InvalidStatusTransition)
    }
}

// ── CreateBooking ────────────────────────────────────────────────────────────

pub struct CreateBookingInput {
    pub property_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub struct CreateBookingUseCase<B, P, U>
where
    B: BookingRepository,
    P: PropertyRepository,
    U: UserRepository,
{
    pub booking_repo: B,
    pub property_repo: P,
    pub user_repo: U,
}

impl<B, P, U> CreateBookingUseCase<B, P, U>
where
    B: BookingRepository,
    P: PropertyRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        caller: Caller,
        input: CreateBookingInput,
    ) -> Result<Booking, BookingServiceError> {
        if caller.role != UserRole::Guest {
            return Err(BookingServiceError::Forbidden);
        }
        let guest = self
            .user_repo
            .find_by_id(caller.id)
            .await?
            .ok_or(BookingServiceError::UserNotFound)?;
        if guest.blocked {
            return Err(BookingServiceError::Blocked);
        }
        let property = self
            .property_repo
            .find_by_id(input.property_id)
            .await?
            .ok_or(BookingServiceError::PropertyNotFound)?;
        let nights =
            stay_nights(input.start_date, input.end_date).ok_or(BookingServiceError::InvalidDates)?;
        let periods = self.property_repo.list_availability(property.id).await?;
        if !covered_by_periods(input.start_date, input.end_date, &periods) {
            return Err(BookingServiceError::PropertyUnavailable);
        }
        let owner = self
            .user_repo
            .find_by_id(property.owner_id)
            .await?
            .ok_or_else(|| anyhow!("property {} references missing owner", property.id))?;

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::now_v7(),
            guest_id: caller.id,
            property_id: property.id,
            status: BookingStatus::Pending,
            start_date: input.start_date,
            end_date: input.end_date,
            price_cents: nights * property.nightly_rate_cents,
            created_at: now,
            updated_at: now,
        };
        let who = Participants {
            guest_id: caller.id,
            owner_id: property.owner_id,
        };
        let notifications = BookingEvent::Created.notifications(&property.name, &who);
        let email = BookingEvent::Created
            .email(&property.name, &guest.email, &owner.email)
            .map(|draft| OutboxEvent::email(&draft, format!("booking:{}:created", booking.id)));
        self.booking_repo
            .create_with_effects(&booking, &notifications, email.as_ref())
            .await?;
        Ok(booking)
    }
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub struct GetBookingUseCase<B: BookingRepository> {
    pub repo: B,
}

impl<B: BookingRepository> GetBookingUseCase<B> {
    pub async fn execute(
        &self,
        caller: Caller,
        booking_id: Uuid,
    ) -> Result<BookingDetail, BookingServiceError> {
        let detail = self
            .repo
            .find_detail(booking_id)
            .await?
            .ok_or(BookingServiceError::BookingNotFound)?;
        let involved =
            caller.id == detail.booking.guest_id || caller.id == detail.property.owner_id;
        if !involved && !caller.is_admin() {
            return Err(BookingServiceError::Forbidden);
        }
        Ok(detail)
    }
}

pub struct ListMyBookingsUseCase<B: BookingRepository> {
    pub repo: B,
}

impl<B: BookingRepository> ListMyBookingsUseCase<B> {
    pub async fn execute(&self, caller: Caller) -> Result<Vec<Booking>, BookingServiceError> {
        self.repo.list_by_guest(caller.id).await
    }
}

pub struct ListOwnerBookingsUseCase<B: BookingRepository> {
    pub repo: B,
}

impl<B: BookingRepository> ListOwnerBookingsUseCase<B> {
    pub async fn execute(&self, caller: Caller) -> Result<Vec<Booking>, BookingServiceError> {
        if caller.role != UserRole::Owner {
            return Err(BookingServiceError::Forbidden);
        }
        self.repo.list_by_owner(caller.id).await
    }
}

pub struct ListAllBookingsUseCase<B: BookingRepository> {
    pub repo: B,
}

impl<B: BookingRepository> ListAllBookingsUseCase<B> {
    pub async fn execute(&self) -> Result<Vec<Booking>, BookingServiceError> {
        self.repo.list_all().await
    }
}

// ── UpdateBooking ────────────────────────────────────────────────────────────

pub struct UpdateBookingInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub struct UpdateBookingUseCase<B, P>
where
    B: BookingRepository,
    P: PropertyRepository,
{
    pub booking_repo: B,
    pub property_repo: P,
}

impl<B, P> UpdateBookingUseCase<B, P>
where
    B: BookingRepository,
    P: PropertyRepository,
{
    pub async fn execute(
        &self,
        caller: Caller,
        booking_id: Uuid,
        input: UpdateBookingInput,
    ) -> Result<Booking, BookingServiceError> {
        let detail = self
            .booking_repo
            .find_detail(booking_id)
            .await?
            .ok_or(BookingServiceError::BookingNotFound)?;
        if detail.booking.guest_id != caller.id {
            return Err(BookingServiceError::Forbidden);
        }
        if detail.guest.blocked {
            return Err(BookingServiceError::Blocked);
        }
        let nights =
            stay_nights(input.start_date, input.end_date).ok_or(BookingServiceError::InvalidDates)?;
        let periods = self
            .property_repo
            .list_availability(detail.property.id)
            .await?;
        if !covered_by_periods(input.start_date, input.end_date, &periods) {
            return Err(BookingServiceError::PropertyUnavailable);
        }

        let mut booking = detail.booking;
        booking.start_date = input.start_date;
        booking.end_date = input.end_date;
        booking.price_cents = nights * detail.property.nightly_rate_cents;
        booking.updated_at = Utc::now();

        let who = Participants {
            guest_id: booking.guest_id,
            owner_id: detail.property.owner_id,
        };
        let notifications = BookingEvent::Updated.notifications(&detail.property.name, &who);
        self.booking_repo
            .update_with_effects(&booking, &notifications)
            .await?;
        Ok(booking)
    }
}

// ── Approve / Reject ─────────────────────────────────────────────────────────

pub struct ApproveBookingUseCase<B: BookingRepository> {
    pub repo: B,
}

impl<B: BookingRepository> ApproveBookingUseCase<B> {
    pub async fn execute(
        &self,
        caller: Caller,
        booking_id: Uuid,
    ) -> Result<Booking, BookingServiceError> {
        let detail = self
            .repo
            .find_detail(booking_id)
            .await?
            .ok_or(BookingServiceError::BookingNotFound)?;
        if detail.property.owner_id != caller.id {
            return Err(BookingServiceError::Forbidden);
        }
        ensure_transition(detail.booking.status, BookingStatus::Confirmed)?;

        let who = Participants {
            guest_id: detail.booking.guest_id,
            owner_id: detail.property.owner_id,
        };
        let notifications = BookingEvent::Approved.notifications(&detail.property.name, &who);
        let email = BookingEvent::Approved
            .email(&detail.property.name, &detail.guest.email, &detail.owner.email)
            .map(|draft| OutboxEvent::email(&draft, format!("booking:{booking_id}:approved")));
        self.repo
            .set_status_with_effects(
                booking_id,
                BookingStatus::Confirmed,
                &notifications,
                email.as_ref(),
            )
            .await?;

        let mut booking = detail.booking;
        booking.status = BookingStatus::Confirmed;
        Ok(booking)
    }
}

pub struct RejectBookingUseCase<B: BookingRepository> {
    pub repo: B,
}

impl<B: BookingRepository> RejectBookingUseCase<B> {
    pub async fn execute(
        &self,
        caller: Caller,
        booking_id: Uuid,
    ) -> Result<Booking, BookingServiceError> {
        let detail = self
            .repo
            .find_detail(booking_id)
            .await?
            .ok_or(BookingServiceError::BookingNotFound)?;
        if detail.property.owner_id != caller.id {
            return Err(BookingServiceError::Forbidden);
        }
        ensure_transition(detail.booking.status, BookingStatus::Rejected)?;

        let who = Participants {
            guest_id: detail.booking.guest_id,
            owner_id: detail.property.owner_id,
        };
        let notifications = BookingEvent::Rejected.notifications(&detail.property.name, &who);
        self.repo
            .set_status_with_effects(booking_id, BookingStatus::Rejected, &notifications, None)
            .await?;

        let mut booking = detail.booking;
        booking.status = BookingStatus::Rejected;
        Ok(booking)
    }
}

// ── PayBooking ───────────────────────────────────────────────────────────────

pub struct PayBookingUseCase<B: BookingRepository> {
    pub repo: B,
}

impl<B: BookingRepository> PayBookingUseCase<B> {
    pub async fn execute(
        &self,
        caller: Caller,
        booking_id: Uuid,
    ) -> Result<Booking, BookingServiceError> {
        let detail = self
            .repo
            .find_detail(booking_id)
            .await?
            .ok_or(BookingServiceError::BookingNotFound)?;
        if detail.booking.guest_id != caller.id {
            return Err(BookingServiceError::Forbidden);
        }
        ensure_transition(detail.booking.status, BookingStatus::Paid)?;

        let who = Participants {
            guest_id: detail.booking.guest_id,
            owner_id: detail.property.owner_id,
        };
        // Three notifications: guest success, owner success, guest info.
        let notifications = BookingEvent::Paid.notifications(&detail.property.name, &who);
        self.repo
            .set_status_with_effects(booking_id, BookingStatus::Paid, &notifications, None)
            .await?;

        let mut booking = detail.booking;
        booking.status = BookingStatus::Paid;
        Ok(booking)
    }
}

// ── CancelBooking ────────────────────────────────────────────────────────────

pub struct CancelBookingUseCase<B: BookingRepository> {
    pub repo: B,
}

impl<B: BookingRepository> CancelBookingUseCase<B> {
    pub async fn execute(
        &self,
        caller: Caller,
        booking_id: Uuid,
    ) -> Result<(), BookingServiceError> {
        let detail = self
            .repo
            .find_detail(booking_id)
            .await?
            .ok_or(BookingServiceError::BookingNotFound)?;
        if detail.booking.guest_id != caller.id {
            return Err(BookingServiceError::Forbidden);
        }
        if detail.guest.blocked {
            return Err(BookingServiceError::Blocked);
        }
        let who = Participants {
            guest_id: detail.booking.guest_id,
            owner_id: detail.property.owner_id,
        };
        let notifications = BookingEvent::Cancelled.notifications(&detail.property.name, &who);
        self.repo
            .delete_with_effects(booking_id, &notifications)
            .await
    }
}
