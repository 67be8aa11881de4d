use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;

use stayline_auth_types::identity::IdentityHeaders;

use crate::domain::types::Notification;
use crate::error::BookingServiceError;
use crate::handlers::caller_from;
use crate::handlers::user::MessageResponse;
use crate::state::AppState;
use crate::usecase::notification::{
    DeleteAllNotificationsUseCase, DeleteNotificationUseCase, ListNotificationsUseCase,
    MarkNotificationReadUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub message: String,
    pub kind: String,
    pub read: bool,
    #[serde(serialize_with = "stayline_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            message: notification.message,
            kind: notification.kind,
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

// ── GET /notifications ───────────────────────────────────────────────────────

pub async fn get_notifications(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<NotificationResponse>>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = ListNotificationsUseCase {
        repo: state.notification_repo(),
    };
    let notifications = usecase.execute(caller).await?;
    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

// ── PUT /notifications/{id}/read ─────────────────────────────────────────────

pub async fn mark_notification_read(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> Result<StatusCode, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = MarkNotificationReadUseCase {
        repo: state.notification_repo(),
    };
    usecase.execute(caller, notification_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /notifications/{id} ───────────────────────────────────────────────

pub async fn delete_notification(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = DeleteNotificationUseCase {
        repo: state.notification_repo(),
    };
    usecase.execute(caller, notification_id).await?;
    Ok(Json(MessageResponse {
        message: "notification deleted".to_owned(),
    }))
}

// ── DELETE /notifications ────────────────────────────────────────────────────

pub async fn delete_all_notifications(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, BookingServiceError> {
    let caller = caller_from(&identity)?;
    let usecase = DeleteAllNotificationsUseCase {
        repo: state.notification_repo(),
    };
    let removed = usecase.execute(caller).await?;
    Ok(Json(MessageResponse {
        message: format!("{removed} notifications deleted"),
    }))
}
