//! Defines the WebSocket message protocol between the browser client and the
//! API server. Prompts flow server-to-client; the client answers the most
//! recent prompt with a `text` or `selection` message.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from the client (browser) to the server.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Starts the session. This must be the first message.
    Init,
    /// Free-text reply to the most recent `prompt_text`.
    Text { text: String },
    /// 0-based option indices replying to the most recent `prompt_selection`.
    Selection { indices: Vec<usize> },
}

/// Messages sent from the server to the client (browser).
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Confirms successful session initialization.
    Initialized { session_id: Uuid },
    /// Text for the client to render.
    Display { text: String },
    /// Asks the client for free text.
    PromptText { description: String },
    /// Asks the client to select zero or more options.
    PromptSelection {
        description: String,
        options: Vec<String>,
    },
    /// The session reached its terminal state or was interrupted.
    SessionEnded { outcome: String },
    /// Reports a fatal error to the client.
    Error { message: String },
}
