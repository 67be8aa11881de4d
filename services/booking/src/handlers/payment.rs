use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stayline_auth_types::identity::IdentityHeaders;
use stayline_domain::payment::PaymentStatus;

use crate::domain::types::PaymentDetail;
use crate::error::BookingServiceError;
use crate::handlers::caller_from;
use crate::handlers::user::MessageResponse;
use crate::state::AppState;
use crate::usecase::payment::{
    CreatePaymentInput, CreatePaymentUseCase, DeletePaymentUseCase, GetPaymentUseCase,
    ListPaymentsUseCase, UpdatePaymentInput, UpdatePaymentUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub booking_id: String,
    pub amount_cents: i64,
    pub status: PaymentStatus,
    pub property_name: String,
    #[serde(serialize_with = "stayline_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "stayline_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<PaymentDetail> for PaymentResponse {
    fn from(detail: PaymentDetail) -> Self {
        Self {
            id: detail.payment.id.to_string(),
            booking_id: detail.payment.booking_id.to_string(),
            amount_cents: detail.payment.amount_cents,
            status: detail.payment.status,
            property_name: detail.property.name,
            created_at: detail.payment.created_at,
            updated_at: detail.payment.updated_at,
        }
    }
}

// ── POST /payments ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePaymentRequest {
    pub booking_id: Uuid,
    pub amount_cents: i64,
    pub status: Option<PaymentStatus>,
}

pub async fn create_payment(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = CreatePaymentUseCase {
        payment_repo: state.payment_repo(),
        booking_repo: state.booking_repo(),
    };
    let detail = usecase
        .execute(
            caller,
            CreatePaymentInput {
                booking_id: body.booking_id,
                amount_cents: body.amount_cents,
                status: body.status,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

// ── GET /payments ────────────────────────────────────────────────────────────

pub async fn get_payments(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<PaymentResponse>>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = ListPaymentsUseCase {
        repo: state.payment_repo(),
    };
    let payments = usecase.execute(caller).await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

// ── GET /payments/{id} ───────────────────────────────────────────────────────

pub async fn get_payment(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = GetPaymentUseCase {
        repo: state.payment_repo(),
    };
    let detail = usecase.execute(caller, payment_id).await?;
    Ok(Json(detail.into()))
}

// ── PUT /payments/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePaymentRequest {
    pub amount_cents: Option<i64>,
    pub status: Option<PaymentStatus>,
}

pub async fn update_payment(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
    Json(body): Json<UpdatePaymentRequest>,
) -> Result<StatusCode, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = UpdatePaymentUseCase {
        repo: state.payment_repo(),
    };
    usecase
        .execute(
            caller,
            payment_id,
            UpdatePaymentInput {
                amount_cents: body.amount_cents,
                status: body.status,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /payments/{id} ────────────────────────────────────────────────────

pub async fn delete_payment(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = DeletePaymentUseCase {
        repo: state.payment_repo(),
    };
    usecase.execute(caller, payment_id).await?;
    Ok(Json(MessageResponse {
        message: "payment deleted".to_owned(),
    }))
}
