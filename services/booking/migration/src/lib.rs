use sea_orm_migration::prelude::*;

mod m20260401_000001_create_users;
mod m20260401_000002_create_properties;
mod m20260401_000003_create_availability_periods;
mod m20260401_000004_create_bookings;
mod m20260401_000005_create_payments;
mod m20260401_000006_create_notifications;
mod m20260401_000007_create_outbox_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_users::Migration),
            Box::new(m20260401_000002_create_properties::Migration),
            Box::new(m20260401_000003_create_availability_periods::Migration),
            Box::new(m20260401_000004_create_bookings::Migration),
            Box::new(m20260401_000005_create_payments::Migration),
            Box::new(m20260401_000006_create_notifications::Migration),
            Box::new(m20260401_000007_create_outbox_events::Migration),
        ]
    }
}
