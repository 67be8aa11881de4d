use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
};
use uuid::Uuid;

use stayline_booking_schema::{
    availability_periods, bookings, notifications, outbox_events, payments, properties, users,
};
use stayline_domain::booking::BookingStatus;
use stayline_domain::events::NotificationDraft;
use stayline_domain::pagination::PageRequest;
use stayline_domain::payment::PaymentStatus;
use stayline_domain::user::UserRole;

use crate::domain::repository::{
    BookingRepository, NotificationRepository, OutboxRepository, PaymentRepository,
    PropertyRepository, UserRepository,
};
use crate::domain::types::{
    AvailabilityPeriod, Booking, BookingDetail, Notification, OutboxEvent, Payment, PaymentDetail,
    Property, User,
};
use crate::error::BookingServiceError;

// ── Fan-out helpers ──────────────────────────────────────────────────────────

/// Active models for notification drafts, stamped with one shared timestamp.
fn notification_models(drafts: &[NotificationDraft]) -> Vec<notifications::ActiveModel> {
    let now = Utc::now();
    drafts
        .iter()
        .map(|draft| notifications::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(draft.user_id),
            message: Set(draft.message.clone()),
            kind: Set(draft.kind.as_str().to_owned()),
            read: Set(false),
            created_at: Set(now),
        })
        .collect()
}

fn outbox_model(event: &OutboxEvent) -> outbox_events::ActiveModel {
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(event.attempts),
        last_error: Set(event.last_error.clone()),
        created_at: Set(event.created_at),
        next_attempt_at: Set(event.next_attempt_at),
        processed_at: Set(event.processed_at),
        failed_at: Set(event.failed_at),
    }
}

// ── Model conversions ────────────────────────────────────────────────────────

fn user_from_model(model: users::Model) -> Result<User, BookingServiceError> {
    let role = UserRole::from_u8(model.role as u8)
        .ok_or_else(|| anyhow!("unknown user role: {}", model.role))?;
    Ok(User {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        role,
        blocked: model.blocked,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn property_from_model(model: properties::Model) -> Property {
    Property {
        id: model.id,
        owner_id: model.owner_id,
        name: model.name,
        description: model.description,
        nightly_rate_cents: model.nightly_rate_cents,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn period_from_model(model: availability_periods::Model) -> AvailabilityPeriod {
    AvailabilityPeriod {
        id: model.id,
        property_id: model.property_id,
        start_date: model.start_date,
        end_date: model.end_date,
    }
}

fn booking_from_model(model: bookings::Model) -> Result<Booking, BookingServiceError> {
    let status = BookingStatus::from_str_value(&model.status)
        .ok_or_else(|| anyhow!("unknown booking status: {}", model.status))?;
    Ok(Booking {
        id: model.id,
        guest_id: model.guest_id,
        property_id: model.property_id,
        status,
        start_date: model.start_date,
        end_date: model.end_date,
        price_cents: model.price_cents,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn payment_from_model(model: payments::Model) -> Result<Payment, BookingServiceError> {
    let status = PaymentStatus::from_str_value(&model.status)
        .ok_or_else(|| anyhow!("unknown payment status: {}", model.status))?;
    Ok(Payment {
        id: model.id,
        booking_id: model.booking_id,
        amount_cents: model.amount_cents,
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn notification_from_model(model: notifications::Model) -> Notification {
    Notification {
        id: model.id,
        user_id: model.user_id,
        message: model.message,
        kind: model.kind,
        read: model.read,
        created_at: model.created_at,
    }
}

fn outbox_from_model(model: outbox_events::Model) -> OutboxEvent {
    OutboxEvent {
        id: model.id,
        kind: model.kind,
        payload: model.payload,
        idempotency_key: model.idempotency_key,
        attempts: model.attempts,
        last_error: model.last_error,
        created_at: model.created_at,
        next_attempt_at: model.next_attempt_at,
        processed_at: model.processed_at,
        failed_at: model.failed_at,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, BookingServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, BookingServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn has_bookings(&self, user_id: Uuid) -> Result<bool, BookingServiceError> {
        let count = bookings::Entity::find()
            .filter(bookings::Column::GuestId.eq(user_id))
            .count(&self.db)
            .await
            .context("count bookings for user")?;
        Ok(count > 0)
    }

    async fn create_with_effects(
        &self,
        user: &User,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        let user = user.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user.id),
                        first_name: Set(user.first_name),
                        last_name: Set(user.last_name),
                        email: Set(user.email),
                        role: Set(user.role.as_u8() as i16),
                        blocked: Set(user.blocked),
                        created_at: Set(user.created_at),
                        updated_at: Set(user.updated_at),
                    }
                    .insert(txn)
                    .await?;
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create user with effects")?;
        Ok(())
    }

    async fn update_profile_with_effects(
        &self,
        user: &User,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        let user = user.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user.id),
                        first_name: Set(user.first_name),
                        last_name: Set(user.last_name),
                        email: Set(user.email),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update user profile with effects")?;
        Ok(())
    }

    async fn set_blocked_with_effects(
        &self,
        user_id: Uuid,
        blocked: bool,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user_id),
                        blocked: Set(blocked),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("set user blocked with effects")?;
        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> Result<(), BookingServiceError> {
        users::Entity::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(())
    }
}

// ── Property repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPropertyRepository {
    pub db: DatabaseConnection,
}

impl PropertyRepository for DbPropertyRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, BookingServiceError> {
        let model = properties::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find property by id")?;
        Ok(model.map(property_from_model))
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Property>, BookingServiceError> {
        let page = page.clamped();
        let models = properties::Entity::find()
            .order_by_desc(properties::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list properties")?;
        Ok(models.into_iter().map(property_from_model).collect())
    }

    async fn list_available(
        &self,
        page: PageRequest,
    ) -> Result<Vec<(Property, Vec<AvailabilityPeriod>)>, BookingServiceError> {
        let page = page.clamped();
        let models = properties::Entity::find()
            .order_by_desc(properties::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list available properties")?;

        let mut results = Vec::with_capacity(models.len());
        for model in models {
            let periods = self.list_availability(model.id).await?;
            if !periods.is_empty() {
                results.push((property_from_model(model), periods));
            }
        }
        Ok(results)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, BookingServiceError> {
        let models = properties::Entity::find()
            .filter(properties::Column::OwnerId.eq(owner_id))
            .order_by_desc(properties::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list properties by owner")?;
        Ok(models.into_iter().map(property_from_model).collect())
    }

    async fn list_availability(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<AvailabilityPeriod>, BookingServiceError> {
        let models = availability_periods::Entity::find()
            .filter(availability_periods::Column::PropertyId.eq(property_id))
            .order_by_asc(availability_periods::Column::StartDate)
            .all(&self.db)
            .await
            .context("list availability periods")?;
        Ok(models.into_iter().map(period_from_model).collect())
    }

    async fn create_with_effects(
        &self,
        property: &Property,
        periods: &[AvailabilityPeriod],
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        let property = property.clone();
        let periods = periods.to_vec();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    properties::ActiveModel {
                        id: Set(property.id),
                        owner_id: Set(property.owner_id),
                        name: Set(property.name),
                        description: Set(property.description),
                        nightly_rate_cents: Set(property.nightly_rate_cents),
                        created_at: Set(property.created_at),
                        updated_at: Set(property.updated_at),
                    }
                    .insert(txn)
                    .await?;
                    for period in periods {
                        availability_periods::ActiveModel {
                            id: Set(period.id),
                            property_id: Set(period.property_id),
                            start_date: Set(period.start_date),
                            end_date: Set(period.end_date),
                        }
                        .insert(txn)
                        .await?;
                    }
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create property with effects")?;
        Ok(())
    }

    async fn update_with_effects(
        &self,
        property: &Property,
        periods: Option<&[AvailabilityPeriod]>,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        let property = property.clone();
        let periods = periods.map(<[AvailabilityPeriod]>::to_vec);
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    properties::ActiveModel {
                        id: Set(property.id),
                        name: Set(property.name),
                        description: Set(property.description),
                        nightly_rate_cents: Set(property.nightly_rate_cents),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    if let Some(periods) = periods {
                        availability_periods::Entity::delete_many()
                            .filter(availability_periods::Column::PropertyId.eq(property.id))
                            .exec(txn)
                            .await?;
                        for period in periods {
                            availability_periods::ActiveModel {
                                id: Set(period.id),
                                property_id: Set(period.property_id),
                                start_date: Set(period.start_date),
                                end_date: Set(period.end_date),
                            }
                            .insert(txn)
                            .await?;
                        }
                    }
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update property with effects")?;
        Ok(())
    }

    async fn delete_with_effects(
        &self,
        property_id: Uuid,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    properties::Entity::delete_by_id(property_id)
                        .exec(txn)
                        .await?;
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("delete property with effects")?;
        Ok(())
    }
}

// ── Booking repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookingRepository {
    pub db: DatabaseConnection,
}

impl DbBookingRepository {
    async fn load_detail(
        &self,
        model: bookings::Model,
    ) -> Result<BookingDetail, BookingServiceError> {
        let property = properties::Entity::find_by_id(model.property_id)
            .one(&self.db)
            .await
            .context("load booking property")?
            .ok_or_else(|| anyhow!("booking {} references missing property", model.id))?;
        let guest = users::Entity::find_by_id(model.guest_id)
            .one(&self.db)
            .await
            .context("load booking guest")?
            .ok_or_else(|| anyhow!("booking {} references missing guest", model.id))?;
        let owner = users::Entity::find_by_id(property.owner_id)
            .one(&self.db)
            .await
            .context("load booking owner")?
            .ok_or_else(|| anyhow!("property {} references missing owner", property.id))?;
        Ok(BookingDetail {
            booking: booking_from_model(model)?,
            property: property_from_model(property),
            guest: user_from_model(guest)?,
            owner: user_from_model(owner)?,
        })
    }
}

impl BookingRepository for DbBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, BookingServiceError> {
        let model = bookings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find booking by id")?;
        model.map(booking_from_model).transpose()
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<BookingDetail>, BookingServiceError> {
        let model = bookings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find booking for detail")?;
        match model {
            Some(model) => Ok(Some(self.load_detail(model).await?)),
            None => Ok(None),
        }
    }

    async fn list_by_guest(&self, guest_id: Uuid) -> Result<Vec<Booking>, BookingServiceError> {
        let models = bookings::Entity::find()
            .filter(bookings::Column::GuestId.eq(guest_id))
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list bookings by guest")?;
        models.into_iter().map(booking_from_model).collect()
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, BookingServiceError> {
        let models = bookings::Entity::find()
            .join(JoinType::InnerJoin, bookings::Relation::Property.def())
            .filter(properties::Column::OwnerId.eq(owner_id))
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list bookings by property owner")?;
        models.into_iter().map(booking_from_model).collect()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingServiceError> {
        let models = bookings::Entity::find()
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list all bookings")?;
        models.into_iter().map(booking_from_model).collect()
    }

    async fn create_with_effects(
        &self,
        booking: &Booking,
        notifications: &[NotificationDraft],
        email: Option<&OutboxEvent>,
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        let email_row = email.map(outbox_model);
        let booking = booking.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    bookings::ActiveModel {
                        id: Set(booking.id),
                        guest_id: Set(booking.guest_id),
                        property_id: Set(booking.property_id),
                        status: Set(booking.status.as_str().to_owned()),
                        start_date: Set(booking.start_date),
                        end_date: Set(booking.end_date),
                        price_cents: Set(booking.price_cents),
                        created_at: Set(booking.created_at),
                        updated_at: Set(booking.updated_at),
                    }
                    .insert(txn)
                    .await?;
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    if let Some(row) = email_row {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create booking with effects")?;
        Ok(())
    }

    async fn update_with_effects(
        &self,
        booking: &Booking,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        let booking = booking.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    bookings::ActiveModel {
                        id: Set(booking.id),
                        start_date: Set(booking.start_date),
                        end_date: Set(booking.end_date),
                        price_cents: Set(booking.price_cents),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update booking with effects")?;
        Ok(())
    }

    async fn set_status_with_effects(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
        notifications: &[NotificationDraft],
        email: Option<&OutboxEvent>,
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        let email_row = email.map(outbox_model);
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    bookings::ActiveModel {
                        id: Set(booking_id),
                        status: Set(status.as_str().to_owned()),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    if let Some(row) = email_row {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("set booking status with effects")?;
        Ok(())
    }

    async fn delete_with_effects(
        &self,
        booking_id: Uuid,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    bookings::Entity::delete_by_id(booking_id).exec(txn).await?;
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("delete booking with effects")?;
        Ok(())
    }
}

// ── Payment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPaymentRepository {
    pub db: DatabaseConnection,
}

impl DbPaymentRepository {
    async fn load_detail(
        &self,
        model: payments::Model,
    ) -> Result<PaymentDetail, BookingServiceError> {
        let booking = bookings::Entity::find_by_id(model.booking_id)
            .one(&self.db)
            .await
            .context("load payment booking")?
            .ok_or_else(|| anyhow!("payment {} references missing booking", model.id))?;
        let property = properties::Entity::find_by_id(booking.property_id)
            .one(&self.db)
            .await
            .context("load payment property")?
            .ok_or_else(|| anyhow!("booking {} references missing property", booking.id))?;
        let guest = users::Entity::find_by_id(booking.guest_id)
            .one(&self.db)
            .await
            .context("load payment guest")?
            .ok_or_else(|| anyhow!("booking {} references missing guest", booking.id))?;
        let owner = users::Entity::find_by_id(property.owner_id)
            .one(&self.db)
            .await
            .context("load payment owner")?
            .ok_or_else(|| anyhow!("property {} references missing owner", property.id))?;
        Ok(PaymentDetail {
            payment: payment_from_model(model)?,
            booking: booking_from_model(booking)?,
            property: property_from_model(property),
            guest: user_from_model(guest)?,
            owner: user_from_model(owner)?,
        })
    }
}

impl PaymentRepository for DbPaymentRepository {
    async fn find_detail(&self, id: Uuid) -> Result<Option<PaymentDetail>, BookingServiceError> {
        let model = payments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find payment by id")?;
        match model {
            Some(model) => Ok(Some(self.load_detail(model).await?)),
            None => Ok(None),
        }
    }

    async fn list_by_guest(
        &self,
        guest_id: Uuid,
    ) -> Result<Vec<PaymentDetail>, BookingServiceError> {
        let models = payments::Entity::find()
            .join(JoinType::InnerJoin, payments::Relation::Booking.def())
            .filter(bookings::Column::GuestId.eq(guest_id))
            .order_by_desc(payments::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list payments by guest")?;
        let mut results = Vec::with_capacity(models.len());
        for model in models {
            results.push(self.load_detail(model).await?);
        }
        Ok(results)
    }

    async fn create_with_effects(
        &self,
        payment: &Payment,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        let payment = payment.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    payments::ActiveModel {
                        id: Set(payment.id),
                        booking_id: Set(payment.booking_id),
                        amount_cents: Set(payment.amount_cents),
                        status: Set(payment.status.as_str().to_owned()),
                        created_at: Set(payment.created_at),
                        updated_at: Set(payment.updated_at),
                    }
                    .insert(txn)
                    .await?;
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create payment with effects")?;
        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), BookingServiceError> {
        payments::ActiveModel {
            id: Set(payment.id),
            amount_cents: Set(payment.amount_cents),
            status: Set(payment.status.as_str().to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update payment")?;
        Ok(())
    }

    async fn delete_with_effects(
        &self,
        payment_id: Uuid,
        notifications: &[NotificationDraft],
    ) -> Result<(), BookingServiceError> {
        let notification_rows = notification_models(notifications);
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    payments::Entity::delete_by_id(payment_id).exec(txn).await?;
                    for row in notification_rows {
                        row.insert(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("delete payment with effects")?;
        Ok(())
    }
}

// ── Notification repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNotificationRepository {
    pub db: DatabaseConnection,
}

impl NotificationRepository for DbNotificationRepository {
    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, BookingServiceError> {
        let models = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .order_by_desc(notifications::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list notifications")?;
        Ok(models.into_iter().map(notification_from_model).collect())
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, BookingServiceError> {
        use sea_orm::sea_query::Expr;

        // Ownership is part of the filter: a foreign id updates nothing.
        let result = notifications::Entity::update_many()
            .col_expr(notifications::Column::Read, Expr::value(true))
            .filter(notifications::Column::Id.eq(id))
            .filter(notifications::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("mark notification read")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_one(&self, id: Uuid, user_id: Uuid) -> Result<bool, BookingServiceError> {
        let result = notifications::Entity::delete_many()
            .filter(notifications::Column::Id.eq(id))
            .filter(notifications::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete notification")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_all(&self, user_id: Uuid) -> Result<u64, BookingServiceError> {
        let result = notifications::Entity::delete_many()
            .filter(notifications::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete all notifications")?;
        Ok(result.rows_affected)
    }
}

// ── Outbox repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOutboxRepository {
    pub db: DatabaseConnection,
}

impl OutboxRepository for DbOutboxRepository {
    async fn due(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<OutboxEvent>, BookingServiceError> {
        let models = outbox_events::Entity::find()
            .filter(outbox_events::Column::ProcessedAt.is_null())
            .filter(outbox_events::Column::FailedAt.is_null())
            .filter(outbox_events::Column::NextAttemptAt.lte(now))
            .order_by_asc(outbox_events::Column::NextAttemptAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("find due outbox events")?;
        Ok(models.into_iter().map(outbox_from_model).collect())
    }

    async fn mark_processed(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), BookingServiceError> {
        outbox_events::ActiveModel {
            id: Set(id),
            processed_at: Set(Some(now)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark outbox event processed")?;
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
        let mut row = outbox_events::ActiveModel {
            id: Set(id),
            attempts: Set(attempts),
            last_error: Set(Some(error.to_owned())),
            next_attempt_at: Set(next_attempt_at),
            ..Default::default()
        };
        if failed {
            row.failed_at = Set(Some(Utc::now()));
        }
        row.update(&self.db)
            .await
            .context("mark outbox attempt failed")?;
        Ok(())
    }
}
