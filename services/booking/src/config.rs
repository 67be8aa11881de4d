/// Booking service configuration loaded from environment variables.
#[derive(Debug)]
pub struct BookingConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `BOOKING_PORT`.
    pub booking_port: u16,
    /// Outbox worker poll interval in seconds (default 5). Env var: `OUTBOX_POLL_SECS`.
    pub outbox_poll_secs: u64,
}

impl BookingConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            booking_port: std::env::var("BOOKING_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            outbox_poll_secs: std::env::var("OUTBOX_POLL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }
}
