use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Booking service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum BookingServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("property not found")]
    PropertyNotFound,
    #[error("booking not found")]
    BookingNotFound,
    #[error("payment not found")]
    PaymentNotFound,
    #[error("notification not found")]
    NotificationNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("user has bookings")]
    UserHasBookings,
    #[error("invalid booking status transition")]
    InvalidStatusTransition,
    #[error("invalid payment amount")]
    InvalidAmount,
    #[error("payment amount exceeds booking price")]
    AmountExceedsPrice,
    #[error("invalid dates")]
    InvalidDates,
    #[error("property unavailable for the requested dates")]
    PropertyUnavailable,
    #[error("missing data")]
    MissingData,
    #[error("account is blocked")]
    Blocked,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl BookingServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PropertyNotFound => "PROPERTY_NOT_FOUND",
            Self::BookingNotFound => "BOOKING_NOT_FOUND",
            Self::PaymentNotFound => "PAYMENT_NOT_FOUND",
            Self::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::UserHasBookings => "USER_HAS_BOOKINGS",
            Self::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::AmountExceedsPrice => "AMOUNT_EXCEEDS_PRICE",
            Self::InvalidDates => "INVALID_DATES",
            Self::PropertyUnavailable => "PROPERTY_UNAVAILABLE",
            Self::MissingData => "MISSING_DATA",
            Self::Blocked => "BLOCKED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for BookingServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::PropertyNotFound
            | Self::BookingNotFound
            | Self::PaymentNotFound
            | Self::NotificationNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists | Self::UserHasBookings | Self::InvalidStatusTransition => {
                StatusCode::CONFLICT
            }
            Self::InvalidAmount
            | Self::AmountExceedsPrice
            | Self::InvalidDates
            | Self::PropertyUnavailable
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Blocked | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    async fn assert_error(
        error: BookingServiceError,
        expected_status: StatusCode,
        expected_kind: &str,
        expected_message: &str,
    ) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["kind"], expected_kind);
        assert_eq!(json["message"], expected_message);
    }

    #[tokio::test]
    async fn should_return_user_not_found() {
        assert_error(
            BookingServiceError::UserNotFound,
            StatusCode::NOT_FOUND,
            "USER_NOT_FOUND",
            "user not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_property_not_found() {
        assert_error(
            BookingServiceError::PropertyNotFound,
            StatusCode::NOT_FOUND,
            "PROPERTY_NOT_FOUND",
            "property not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_booking_not_found() {
        assert_error(
            BookingServiceError::BookingNotFound,
            StatusCode::NOT_FOUND,
            "BOOKING_NOT_FOUND",
            "booking not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_payment_not_found() {
        assert_error(
            BookingServiceError::PaymentNotFound,
            StatusCode::NOT_FOUND,
            "PAYMENT_NOT_FOUND",
            "payment not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_notification_not_found() {
        assert_error(
            BookingServiceError::NotificationNotFound,
            StatusCode::NOT_FOUND,
            "NOTIFICATION_NOT_FOUND",
            "notification not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_user_already_exists() {
        assert_error(
            BookingServiceError::UserAlreadyExists,
            StatusCode::CONFLICT,
            "USER_ALREADY_EXISTS",
            "user already exists",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_user_has_bookings() {
        assert_error(
            BookingServiceError::UserHasBookings,
            StatusCode::CONFLICT,
            "USER_HAS_BOOKINGS",
            "user has bookings",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_invalid_status_transition() {
        assert_error(
            BookingServiceError::InvalidStatusTransition,
            StatusCode::CONFLICT,
            "INVALID_STATUS_TRANSITION",
            "invalid booking status transition",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_invalid_amount() {
        assert_error(
            BookingServiceError::InvalidAmount,
            StatusCode::BAD_REQUEST,
            "INVALID_AMOUNT",
            "invalid payment amount",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_amount_exceeds_price() {
        assert_error(
            BookingServiceError::AmountExceedsPrice,
            StatusCode::BAD_REQUEST,
            "AMOUNT_EXCEEDS_PRICE",
            "payment amount exceeds booking price",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_invalid_dates() {
        assert_error(
            BookingServiceError::InvalidDates,
            StatusCode::BAD_REQUEST,
            "INVALID_DATES",
            "invalid dates",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_property_unavailable() {
        assert_error(
            BookingServiceError::PropertyUnavailable,
            StatusCode::BAD_REQUEST,
            "PROPERTY_UNAVAILABLE",
            "property unavailable for the requested dates",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_blocked() {
        assert_error(
            BookingServiceError::Blocked,
            StatusCode::FORBIDDEN,
            "BLOCKED",
            "account is blocked",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_forbidden() {
        assert_error(
            BookingServiceError::Forbidden,
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "forbidden",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_internal() {
        assert_error(
            BookingServiceError::Internal(anyhow::anyhow!("db error")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal error",
        )
        .await;
    }
}
