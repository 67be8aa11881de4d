use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stayline_auth_types::identity::IdentityHeaders;
use stayline_domain::user::UserRole;

use crate::error::BookingServiceError;
use crate::handlers::caller_from;
use crate::state::AppState;
use crate::usecase::user::{
    DeleteUserUseCase, GetMeUseCase, RegisterUserInput, RegisterUserUseCase, SetUserBlockedUseCase,
    UpdateUserInput, UpdateUserUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: u8,
    pub blocked: bool,
    #[serde(serialize_with = "stayline_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "stayline_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::User> for UserResponse {
    fn from(user: crate::domain::types::User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role.as_u8(),
            blocked: user.blocked,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Option<u8>,
}

/// Public signup. Admin accounts go through `POST /users/admin`.
pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BookingServiceError> {
    let role = body.role.unwrap_or(0);
    if role > 1 {
        return Err(BookingServiceError::Forbidden);
    }
    let role = UserRole::from_u8(role).ok_or(BookingServiceError::Forbidden)?;
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterUserInput {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /users/admin ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterAdminRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

pub async fn register_admin(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<RegisterAdminRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BookingServiceError> {
    if identity.user_role != 2 {
        return Err(BookingServiceError::Forbidden);
    }
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterUserInput {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            role: UserRole::Admin,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, BookingServiceError> {
    let usecase = GetMeUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── PUT /users/{id} ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

pub async fn update_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            caller,
            user_id,
            UpdateUserInput {
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(caller, user_id).await?;
    Ok(Json(MessageResponse {
        message: "user deleted".to_owned(),
    }))
}

// ── PUT /users/{id}/block and /unblock ───────────────────────────────────────

pub async fn block_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BookingServiceError> {
    set_blocked(identity, state, user_id, true).await?;
    Ok(Json(MessageResponse {
        message: "user blocked".to_owned(),
    }))
}

pub async fn unblock_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BookingServiceError> {
    set_blocked(identity, state, user_id, false).await?;
    Ok(Json(MessageResponse {
        message: "user unblocked".to_owned(),
    }))
}

async fn set_blocked(
    identity: IdentityHeaders,
    state: AppState,
    user_id: Uuid,
    blocked: bool,
) -> Result<(), BookingServiceError> {
    if identity.user_role != 2 {
        return Err(BookingServiceError::Forbidden);
    }
    let usecase = SetUserBlockedUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(user_id, blocked).await
}
