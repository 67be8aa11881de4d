//! Types for the identity contract between the gateway and services.
//!
//! Authentication happens upstream; services only decode the headers the
//! gateway injects after verifying the caller's token.

pub mod identity;
