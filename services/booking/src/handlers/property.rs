use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stayline_auth_types::identity::IdentityHeaders;
use stayline_domain::pagination::PageRequest;

use crate::domain::types::{AvailabilityPeriod, Property};
use crate::error::BookingServiceError;
use crate::handlers::caller_from;
use crate::handlers::user::MessageResponse;
use crate::state::AppState;
use crate::usecase::property::{
    CreatePropertyInput, CreatePropertyUseCase, DeletePropertyUseCase, GetAvailabilityUseCase,
    GetPropertyUseCase, ListAvailablePropertiesUseCase, ListMyPropertiesUseCase,
    ListPropertiesUseCase, PeriodInput, UpdatePropertyInput, UpdatePropertyUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PropertyResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub nightly_rate_cents: i64,
    #[serde(serialize_with = "stayline_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "stayline_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id.to_string(),
            owner_id: property.owner_id.to_string(),
            name: property.name,
            description: property.description,
            nightly_rate_cents: property.nightly_rate_cents,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct PeriodResponse {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<AvailabilityPeriod> for PeriodResponse {
    fn from(period: AvailabilityPeriod) -> Self {
        Self {
            id: period.id.to_string(),
            start_date: period.start_date,
            end_date: period.end_date,
        }
    }
}

#[derive(Serialize)]
pub struct AvailablePropertyResponse {
    #[serde(flatten)]
    pub property: PropertyResponse,
    pub availability_periods: Vec<PeriodResponse>,
}

// ── GET /properties ──────────────────────────────────────────────────────────

pub async fn get_properties(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<PropertyResponse>>, BookingServiceError> {
    let usecase = ListPropertiesUseCase {
        repo: state.property_repo(),
    };
    let properties = usecase.execute(page.clamped()).await?;
    Ok(Json(properties.into_iter().map(Into::into).collect()))
}

// ── GET /properties/available ────────────────────────────────────────────────

pub async fn get_available_properties(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<AvailablePropertyResponse>>, BookingServiceError> {
    let usecase = ListAvailablePropertiesUseCase {
        repo: state.property_repo(),
    };
    let properties = usecase.execute(page.clamped()).await?;
    let items = properties
        .into_iter()
        .map(|(property, periods)| AvailablePropertyResponse {
            property: property.into(),
            availability_periods: periods.into_iter().map(Into::into).collect(),
        })
        .collect();
    Ok(Json(items))
}

// ── GET /properties/my-properties ────────────────────────────────────────────

pub async fn get_my_properties(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<PropertyResponse>>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = ListMyPropertiesUseCase {
        repo: state.property_repo(),
    };
    let properties = usecase.execute(caller).await?;
    Ok(Json(properties.into_iter().map(Into::into).collect()))
}

// ── GET /properties/{id} ─────────────────────────────────────────────────────

pub async fn get_property(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<PropertyResponse>, BookingServiceError> {
    let usecase = GetPropertyUseCase {
        repo: state.property_repo(),
    };
    let property = usecase.execute(property_id).await?;
    Ok(Json(property.into()))
}

// ── GET /properties/{id}/availability ────────────────────────────────────────

pub async fn get_property_availability(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<Vec<PeriodResponse>>, BookingServiceError> {
    let usecase = GetAvailabilityUseCase {
        repo: state.property_repo(),
    };
    let periods = usecase.execute(property_id).await?;
    Ok(Json(periods.into_iter().map(Into::into).collect()))
}

// ── POST /properties ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PeriodRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<PeriodRequest> for PeriodInput {
    fn from(p: PeriodRequest) -> Self {
        Self {
            start_date: p.start_date,
            end_date: p.end_date,
        }
    }
}

#[derive(Deserialize)]
pub struct CreatePropertyRequest {
    pub name: String,
    pub description: Option<String>,
    pub nightly_rate_cents: i64,
    #[serde(default)]
    pub availability_periods: Vec<PeriodRequest>,
}

pub async fn create_property(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<PropertyResponse>), BookingServiceError> {
    if identity.user_role < 1 {
        return Err(BookingServiceError::Forbidden);
    }
    let caller = caller_from(&identity)?;
    let usecase = CreatePropertyUseCase {
        property_repo: state.property_repo(),
        user_repo: state.user_repo(),
    };
    let property = usecase
        .execute(
            caller,
            CreatePropertyInput {
                name: body.name,
                description: body.description,
                nightly_rate_cents: body.nightly_rate_cents,
                availability_periods: body
                    .availability_periods
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(property.into())))
}

// ── PUT /properties/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePropertyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub nightly_rate_cents: Option<i64>,
    pub availability_periods: Option<Vec<PeriodRequest>>,
}

pub async fn update_property(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    Json(body): Json<UpdatePropertyRequest>,
) -> Result<Json<PropertyResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = UpdatePropertyUseCase {
        repo: state.property_repo(),
    };
    let property = usecase
        .execute(
            caller,
            property_id,
            UpdatePropertyInput {
                name: body.name,
                description: body.description,
                nightly_rate_cents: body.nightly_rate_cents,
                availability_periods: body
                    .availability_periods
                    .map(|periods| periods.into_iter().map(Into::into).collect()),
            },
        )
        .await?;
    Ok(Json(property.into()))
}

// ── DELETE /properties/{id} ──────────────────────────────────────────────────

pub async fn delete_property(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = DeletePropertyUseCase {
        repo: state.property_repo(),
    };
    usecase.execute(caller, property_id).await?;
    Ok(Json(MessageResponse {
        message: "property deleted".to_owned(),
    }))
}
