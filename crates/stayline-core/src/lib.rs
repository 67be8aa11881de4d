//! Shared web plumbing for Stayline services: health endpoints, request-id
//! middleware, timestamp serialization, and tracing setup.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
