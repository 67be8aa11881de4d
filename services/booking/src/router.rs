use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use stayline_core::health::{healthz, readyz};
use stayline_core::middleware::request_id_layer;

use crate::handlers::{
    booking::{
        approve_booking, cancel_booking, create_booking, get_all_bookings, get_booking,
        get_my_bookings, get_owner_bookings, pay_booking, reject_booking, update_booking,
    },
    notification::{
        delete_all_notifications, delete_notification, get_notifications, mark_notification_read,
    },
    payment::{create_payment, delete_payment, get_payment, get_payments, update_payment},
    property::{
        create_property, delete_property, get_available_properties, get_my_properties,
        get_properties, get_property, get_property_availability, update_property,
    },
    user::{
        block_user, delete_user, get_me, register_admin, register_user, unblock_user, update_user,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(register_user))
        .route("/users/admin", post(register_admin))
        .route("/users/me", get(get_me))
        .route("/users/{id}", put(update_user))
        .route("/users/{id}", delete(delete_user))
        .route("/users/{id}/block", put(block_user))
        .route("/users/{id}/unblock", put(unblock_user))
        // Properties
        .route("/properties", get(get_properties))
        .route("/properties", post(create_property))
        .route("/properties/available", get(get_available_properties))
        .route("/properties/my-properties", get(get_my_properties))
        .route("/properties/{id}", get(get_property))
        .route("/properties/{id}", put(update_property))
        .route("/properties/{id}", delete(delete_property))
        .route(
            "/properties/{id}/availability",
            get(get_property_availability),
        )
        // Bookings
        .route("/bookings", post(create_booking))
        .route("/bookings", get(get_my_bookings))
        .route("/bookings/owner", get(get_owner_bookings))
        .route("/bookings/admin/all", get(get_all_bookings))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}", put(update_booking))
        .route("/bookings/{id}", delete(cancel_booking))
        .route("/bookings/{id}/approve", post(approve_booking))
        .route("/bookings/{id}/reject", post(reject_booking))
        .route("/bookings/{id}/payment", post(pay_booking))
        // Payments
        .route("/payments", post(create_payment))
        .route("/payments", get(get_payments))
        .route("/payments/{id}", get(get_payment))
        .route("/payments/{id}", put(update_payment))
        .route("/payments/{id}", delete(delete_payment))
        // Notifications
        .route("/notifications", get(get_notifications))
        .route("/notifications", delete(delete_all_notifications))
        .route("/notifications/{id}/read", put(mark_notification_read))
        .route("/notifications/{id}", delete(delete_notification))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
