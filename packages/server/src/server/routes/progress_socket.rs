//! WebSocket progress channel.
//!
//! Every connection is an observer of all verification runs. The socket
//! greets on connect, answers `ping` with `pong`, and forwards every
//! progress event published while it is open.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Extension,
    },
    response::Response,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::kernel::ProgressHub;
use crate::server::app::AppState;

pub const GREETING: &str = "Connected to misinformation verifier";

/// Messages sent to a single socket in reply to its own traffic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SocketReply {
    Connection {
        message: String,
        timestamp: DateTime<Utc>,
    },
    Pong {
        timestamp: DateTime<Utc>,
    },
    Error {
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl SocketReply {
    pub fn greeting() -> Self {
        SocketReply::Connection {
            message: GREETING.to_string(),
            timestamp: Utc::now(),
        }
    }

    fn error(message: &str) -> Self {
        SocketReply::Error {
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Reply for one inbound text frame.
pub fn reply_to_client(text: &str) -> SocketReply {
    match serde_json::from_str::<Value>(text) {
        Ok(message) if message.get("type").and_then(Value::as_str) == Some("ping") => {
            SocketReply::Pong {
                timestamp: Utc::now(),
            }
        }
        Ok(_) => SocketReply::error("Unknown message type"),
        Err(_) => SocketReply::error("Invalid message format"),
    }
}

pub async fn progress_socket_handler(
    ws: WebSocketUpgrade,
    Extension(state): Extension<AppState>,
) -> Response {
    let hub = state.progress_hub.clone();
    ws.on_upgrade(move |socket| serve_observer(socket, hub))
}

async fn serve_observer(mut socket: WebSocket, hub: ProgressHub) {
    let mut events = hub.subscribe();
    info!(observers = hub.observer_count(), "Progress observer connected");

    if send_json(&mut socket, &SocketReply::greeting()).await.is_ok() {
        loop {
            tokio::select! {
                inbound = socket.recv() => {
                    let reply = match inbound {
                        Some(Ok(Message::Text(text))) => reply_to_client(&text),
                        Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                            Ok(text) => reply_to_client(text),
                            Err(_) => SocketReply::error("Invalid message format"),
                        },
                        // Ping/pong frames are answered by the protocol layer
                        Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                        Some(Ok(Message::Close(_))) | None => break,
                        Some(Err(e)) => {
                            debug!(error = %e, "Progress socket read failed");
                            break;
                        }
                    };
                    if send_json(&mut socket, &reply).await.is_err() {
                        break;
                    }
                }
                event = events.recv() => match event {
                    Ok(event) => {
                        if send_json(&mut socket, &event).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Progress observer fell behind, events dropped");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
    }

    drop(events);
    info!(observers = hub.observer_count(), "Progress observer disconnected");
}

async fn send_json<T: Serialize>(socket: &mut WebSocket, message: &T) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(message) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Failed to serialize socket message");
            return Ok(());
        }
    };
    socket.send(Message::Text(text)).await
}
