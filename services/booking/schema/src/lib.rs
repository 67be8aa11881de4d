//! sea-orm entities for the booking service database.

pub mod availability_periods;
pub mod bookings;
pub mod notifications;
pub mod outbox_events;
pub mod payments;
pub mod properties;
pub mod users;
