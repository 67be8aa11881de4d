//! Domain types shared across the Stayline booking platform.
//!
//! Pure types only: statuses, roles, pagination, and the notification
//! dispatch tables. No framework dependencies.

pub mod booking;
pub mod events;
pub mod notification;
pub mod pagination;
pub mod payment;
pub mod user;
