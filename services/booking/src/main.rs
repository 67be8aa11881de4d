use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use stayline_booking::config::BookingConfig;
use stayline_booking::infra::outbox::{LogEmailSender, run_outbox_worker};
use stayline_booking::router::build_router;
use stayline_booking::state::AppState;

#[tokio::main]
async fn main() {
    stayline_core::tracing::init_tracing();

    let config = BookingConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    // Spawn outbox delivery worker
    let outbox_repo = state.outbox_repo();
    let poll = Duration::from_secs(config.outbox_poll_secs);
    tokio::spawn(async move {
        run_outbox_worker(outbox_repo, LogEmailSender, poll).await;
    });

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.booking_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("booking service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
