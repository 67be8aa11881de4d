use axum::http::StatusCode;

/// `GET /healthz` — the process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — the process can take traffic. A service that needs a
/// dependency probe mounts its own handler instead of this one.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
