//! Manages the WebSocket connection lifecycle for one engine session.
//!
//! Each accepted connection gets its own `SessionEngine` running in a
//! spawned task. The engine's user-interface capability is backed by a pair
//! of channels: prompts and display text flow out to the socket, client
//! replies flow back in. A client disconnect closes the inbound channel,
//! which the engine observes as a user interrupt and unwinds cleanly.

use super::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use anyhow::Result;
use async_trait::async_trait;
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use healthbot_core::capabilities::{PromptError, UserInterface};
use healthbot_core::machine::{SessionEngine, SessionOutcome};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{Instrument, error, info, instrument, warn};
use uuid::Uuid;

/// Axum handler to upgrade an HTTP connection to a WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// A [`UserInterface`] bridged over the WebSocket channels.
struct WsInterface {
    outbound: mpsc::Sender<ServerMessage>,
    inbound: Mutex<mpsc::Receiver<ClientMessage>>,
}

#[async_trait]
impl UserInterface for WsInterface {
    async fn prompt(&self, description: &str) -> Result<String, PromptError> {
        self.outbound
            .send(ServerMessage::PromptText {
                description: description.to_string(),
            })
            .await
            .map_err(|_| PromptError::Interrupted)?;

        let mut inbound = self.inbound.lock().await;
        loop {
            match inbound.recv().await {
                Some(ClientMessage::Text { text }) => return Ok(text),
                Some(other) => warn!(message = ?other, "expected a text reply; ignoring"),
                None => return Err(PromptError::Interrupted),
            }
        }
    }

    async fn prompt_multi_select(
        &self,
        description: &str,
        options: &[String],
    ) -> Result<BTreeSet<usize>, PromptError> {
        self.outbound
            .send(ServerMessage::PromptSelection {
                description: description.to_string(),
                options: options.to_vec(),
            })
            .await
            .map_err(|_| PromptError::Interrupted)?;

        let mut inbound = self.inbound.lock().await;
        loop {
            match inbound.recv().await {
                Some(ClientMessage::Selection { indices }) => {
                    return Ok(indices.into_iter().collect());
                }
                Some(other) => warn!(message = ?other, "expected a selection reply; ignoring"),
                None => return Err(PromptError::Interrupted),
            }
        }
    }

    async fn display(&self, text: &str) {
        let _ = self
            .outbound
            .send(ServerMessage::Display {
                text: text.to_string(),
            })
            .await;
    }
}

fn outcome_label(outcome: SessionOutcome) -> &'static str {
    match outcome {
        SessionOutcome::Completed => "completed",
        SessionOutcome::Interrupted => "interrupted",
    }
}

/// Main handler for an individual WebSocket connection.
#[instrument(name = "ws_session", skip_all, fields(session_id))]
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = Uuid::new_v4();
    tracing::Span::current().record("session_id", session_id.to_string().as_str());
    info!("New WebSocket connection. Awaiting initialization...");

    let (mut socket_tx, mut socket_rx) = socket.split();

    // The first message from the client must be `init`.
    match socket_rx.next().await {
        Some(Ok(Message::Text(text)))
            if matches!(
                serde_json::from_str::<ClientMessage>(&text),
                Ok(ClientMessage::Init)
            ) => {}
        Some(Ok(_)) => {
            error!("First message was not `init`; closing connection.");
            let _ = send_msg(
                &mut socket_tx,
                ServerMessage::Error {
                    message: "First message must be `init`".to_string(),
                },
            )
            .await;
            return;
        }
        _ => {
            info!("Client disconnected before sending init message.");
            return;
        }
    }

    if send_msg(&mut socket_tx, ServerMessage::Initialized { session_id })
        .await
        .is_err()
    {
        error!("Failed to send Initialized message to client.");
        return;
    }

    let (server_tx, mut server_rx) = mpsc::channel::<ServerMessage>(32);
    let (client_tx, client_rx) = mpsc::channel::<ClientMessage>(32);

    let ui = Arc::new(WsInterface {
        outbound: server_tx.clone(),
        inbound: Mutex::new(client_rx),
    });

    // Spawn the engine for this connection in its own instrumented task.
    let engine_span = tracing::info_span!("engine", %session_id);
    let engine_state = state.clone();
    let engine_tx = server_tx;
    let engine_handle = tokio::spawn(
        async move {
            let mut engine = SessionEngine::new(
                engine_state.search.clone(),
                engine_state.generator.clone(),
                ui,
            );
            let final_msg = match engine.run().await {
                Ok(outcome) => ServerMessage::SessionEnded {
                    outcome: outcome_label(outcome).to_string(),
                },
                Err(err) => {
                    error!(error = %err, "engine session failed");
                    ServerMessage::Error {
                        message: err.to_string(),
                    }
                }
            };
            let _ = engine_tx.send(final_msg).await;
        }
        .instrument(engine_span),
    );

    loop {
        tokio::select! {
            // Forward engine output to the client.
            Some(msg) = server_rx.recv() => {
                let terminal = matches!(
                    msg,
                    ServerMessage::SessionEnded { .. } | ServerMessage::Error { .. }
                );
                if send_msg(&mut socket_tx, msg).await.is_err() {
                    break;
                }
                if terminal {
                    break;
                }
            },
            // Forward client replies to the engine.
            incoming = socket_rx.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(msg) => {
                                if client_tx.send(msg).await.is_err() {
                                    break;
                                }
                            }
                            Err(err) => warn!(error = %err, "ignoring unparseable client message"),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Client disconnected.");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        error!(error = %err, "error receiving from client WebSocket");
                        break;
                    }
                }
            },
            else => break,
        }
    }

    // Closing the reply channel surfaces as an interrupt inside the engine.
    drop(client_tx);
    engine_handle.abort();
    info!("WebSocket connection closed and engine session terminated.");
}

/// A helper function to serialize and send a `ServerMessage` to the client.
async fn send_msg(
    socket_tx: &mut SplitSink<WebSocket, Message>,
    msg: ServerMessage,
) -> Result<()> {
    let serialized = serde_json::to_string(&msg)?;
    socket_tx.send(Message::Text(serialized.into())).await?;
    Ok(())
}
