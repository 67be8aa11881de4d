#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use stayline_domain::booking::BookingStatus;
use stayline_domain::events::NotificationDraft;
use stayline_domain::pagination::PageRequest;

use crate::domain::types::{
    AvailabilityPeriod, Booking, BookingDetail, Notification, OutboxEvent, Payment, PaymentDetail,
    Property, User,
};
use crate::error::BookingServiceError;

/// Repository for user accounts.
///
/// The `*_with_effects` methods persist the row mutation and the fan-out
/// notification rows in one transaction.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, BookingServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, BookingServiceError>;
    async fn has_bookings(&self, user_id: Uuid) -> Result<bool, BookingServiceError>;
    async fn create_with_effects(
        &self,
        user: &User,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError>;
    async fn update_profile_with_effects(
        &self,
        user: &User,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError>;
    async fn set_blocked_with_effects(
        &self,
        user_id: Uuid,
        blocked: bool,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError>;
    async fn delete(&self, user_id: Uuid) -> Result<(), BookingServiceError>;
}

/// Repository for properties and their availability periods.
pub trait PropertyRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, BookingServiceError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<Property>, BookingServiceError>;
    /// Paginated properties that have at least one availability period,
    /// with their periods.
    async fn list_available(
        &self,
        page: PageRequest,
    ) -> Result<Vec<(Property, Vec<AvailabilityPeriod>)>, BookingServiceError>;
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, BookingServiceError>;
    async fn list_availability(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<AvailabilityPeriod>, BookingServiceError>;
    async fn create_with_effects(
        &self,
        property: &Property,
        periods: &[AvailabilityPeriod],
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError>;
    /// Update the property row; when `periods` is provided, replace the
    /// availability periods wholesale.
    async fn update_with_effects(
        &self,
        property: &Property,
        periods: Option<&[AvailabilityPeriod]>,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError>;
    async fn delete_with_effects(
        &self,
        property_id: Uuid,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError>;
}

/// Repository for bookings.
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, BookingServiceError>;
    async fn find_detail(&self, id: Uuid) -> Result<Option<BookingDetail>, BookingServiceError>;
    async fn list_by_guest(&self, guest_id: Uuid) -> Result<Vec<Booking>, BookingServiceError>;
    /// Bookings against any property owned by `owner_id`.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, BookingServiceError>;
    async fn list_all(&self) -> Result<Vec<Booking>, BookingServiceError>;
    async fn create_with_effects(
        &self,
        booking: &Booking,
        notifications: &[NotificationDraft],
        email: Option<&OutboxEvent>,
    ) -> Result<(), BookingServiceError>;
    /// Update dates and recomputed price.
    async fn update_with_effects(
        &self,
        booking: &Booking,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError>;
    async fn set_status_with_effects(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
        notifications: &[NotificationDraft],
        email: Option<&OutboxEvent>,
    ) -> Result<(), BookingServiceError>;
    async fn delete_with_effects(
        &self,
        booking_id: Uuid,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError>;
}

/// Repository for payments.
pub trait PaymentRepository: Send + Sync {
    async fn find_detail(&self, id: Uuid) -> Result<Option<PaymentDetail>, BookingServiceError>;
    /// Payments whose booking belongs to `guest_id`.
    async fn list_by_guest(&self, guest_id: Uuid)
    -> Result<Vec<PaymentDetail>, BookingServiceError>;
    async fn create_with_effects(
        &self,
        payment: &Payment,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError>;
    async fn update(&self, payment: &Payment) -> Result<(), BookingServiceError>;
    async fn delete_with_effects(
        &self,
        payment_id: Uuid,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError>;
}

/// Repository for in-app notifications. Ownership is a filter: operations on
/// a foreign or missing id report "nothing matched", never Forbidden.
pub trait NotificationRepository: Send + Sync {
    /// Newest first, unbounded.
    async fn list_for_user(&self, user_id: Uuid)
    -> Result<Vec<Notification>, BookingServiceError>;
    /// Returns `true` if a row owned by `user_id` was marked.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, BookingServiceError>;
    /// Returns `true` if a row owned by `user_id` was deleted.
    async fn delete_one(&self, id: Uuid, user_id: Uuid) -> Result<bool, BookingServiceError>;
    /// Returns the number of rows deleted (may be 0).
    async fn delete_all(&self, user_id: Uuid) -> Result<u64, BookingServiceError>;
}

/// Repository for the outbox worker.
pub trait OutboxRepository: Send + Sync {
    /// Unprocessed, unfailed rows due at `now`, oldest first.
    async fn due(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<OutboxEvent>, BookingServiceError>;
    async fn mark_processed(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), BookingServiceError>;
    /// Record a delivery failure: bump `attempts`, store `last_error`,
    /// schedule the retry, and set `failed_at` when the cap is reached.
    async fn mark_attempt_failed(
        &self,
        id: Uuid,
        error: &str,
        attempts: i32,
        next_attempt_at: DateTime<Utc>,
        failed: bool,
    ) -> Result<(), BookingServiceError>;
}
