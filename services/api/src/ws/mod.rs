//! WebSocket surface for the session engine.

pub mod protocol;
pub mod session;

pub use session::ws_handler;
