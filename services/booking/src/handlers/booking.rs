use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stayline_auth_types::identity::IdentityHeaders;

use crate::domain::types::Booking;
use crate::error::BookingServiceError;
use crate::handlers::caller_from;
use crate::handlers::user::MessageResponse;
use crate::state::AppState;
use crate::usecase::booking::{
    ApproveBookingUseCase, CancelBookingUseCase, CreateBookingInput, CreateBookingUseCase,
    GetBookingUseCase, ListAllBookingsUseCase, ListMyBookingsUseCase, ListOwnerBookingsUseCase,
    PayBookingUseCase, RejectBookingUseCase, UpdateBookingInput, UpdateBookingUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub guest_id: String,
    pub property_id: String,
    pub status: stayline_domain::booking::BookingStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price_cents: i64,
    #[serde(serialize_with = "stayline_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "stayline_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            guest_id: booking.guest_id.to_string(),
            property_id: booking.property_id.to_string(),
            status: booking.status,
            start_date: booking.start_date,
            end_date: booking.end_date,
            price_cents: booking.price_cents,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct BookingDetailResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    pub property_name: String,
    pub guest_email: String,
    pub owner_email: String,
}

// ── POST /bookings ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub property_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub async fn create_booking(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = CreateBookingUseCase {
        booking_repo: state.booking_repo(),
        property_repo: state.property_repo(),
        user_repo: state.user_repo(),
    };
    let booking = usecase
        .execute(
            caller,
            CreateBookingInput {
                property_id: body.property_id,
                start_date: body.start_date,
                end_date: body.end_date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

// ── GET /bookings ────────────────────────────────────────────────────────────

pub async fn get_my_bookings(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingResponse>>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = ListMyBookingsUseCase {
        repo: state.booking_repo(),
    };
    let bookings = usecase.execute(caller).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

// ── GET /bookings/owner ──────────────────────────────────────────────────────

pub async fn get_owner_bookings(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingResponse>>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = ListOwnerBookingsUseCase {
        repo: state.booking_repo(),
    };
    let bookings = usecase.execute(caller).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

// ── GET /bookings/admin/all ──────────────────────────────────────────────────

pub async fn get_all_bookings(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingResponse>>, BookingServiceError> {
    if identity.user_role != 2 {
        return Err(BookingServiceError::Forbidden);
    }
    let usecase = ListAllBookingsUseCase {
        repo: state.booking_repo(),
    };
    let bookings = usecase.execute().await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

// ── GET /bookings/{id} ───────────────────────────────────────────────────────

pub async fn get_booking(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingDetailResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = GetBookingUseCase {
        repo: state.booking_repo(),
    };
    let detail = usecase.execute(caller, booking_id).await?;
    Ok(Json(BookingDetailResponse {
        booking: detail.booking.into(),
        property_name: detail.property.name,
        guest_email: detail.guest.email,
        owner_email: detail.owner.email,
    }))
}

// ── PUT /bookings/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateBookingRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub async fn update_booking(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = UpdateBookingUseCase {
        booking_repo: state.booking_repo(),
        property_repo: state.property_repo(),
    };
    let booking = usecase
        .execute(
            caller,
            booking_id,
            UpdateBookingInput {
                start_date: body.start_date,
                end_date: body.end_date,
            },
        )
        .await?;
    Ok(Json(booking.into()))
}

// ── DELETE /bookings/{id} ────────────────────────────────────────────────────

pub async fn cancel_booking(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = CancelBookingUseCase {
        repo: state.booking_repo(),
    };
    usecase.execute(caller, booking_id).await?;
    Ok(Json(MessageResponse {
        message: "booking cancelled".to_owned(),
    }))
}

// ── POST /bookings/{id}/approve ──────────────────────────────────────────────

pub async fn approve_booking(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = ApproveBookingUseCase {
        repo: state.booking_repo(),
    };
    let booking = usecase.execute(caller, booking_id).await?;
    Ok(Json(booking.into()))
}

// ── POST /bookings/{id}/reject ───────────────────────────────────────────────

pub async fn reject_booking(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = RejectBookingUseCase {
        repo: state.booking_repo(),
    };
    let booking = usecase.execute(caller, booking_id).await?;
    Ok(Json(booking.into()))
}

// ── POST /bookings/{id}/payment ──────────────────────────────────────────────

pub async fn pay_booking(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = PayBookingUseCase {
        repo: state.booking_repo(),
    };
    let booking = usecase.execute(caller, booking_id).await?;
    Ok(Json(booking.into()))
}
