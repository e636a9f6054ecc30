//! HealthBot API Library Crate
//!
//! The web surface of the patient-education system: an axum service that
//! drives the core session engine over a WebSocket, one engine per
//! connection. The `bin/api.rs` binary is a thin wrapper around this
//! library.

pub mod config;
pub mod router;
pub mod state;
pub mod ws;
