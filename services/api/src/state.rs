//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the capability
//! clients shared by all connections. Each WebSocket session gets its own
//! engine; the capability handles are the only shared resources.

use crate::config::Config;
use healthbot_core::capabilities::{SearchProvider, TextGenerator};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<dyn SearchProvider>,
    pub generator: Arc<dyn TextGenerator>,
    pub config: Arc<Config>,
}
