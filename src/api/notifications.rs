//! Notification Feed
//!
//! Recent notification history over REST, and a WebSocket that pushes every
//! notification and SOS state change as it happens. Clients may also press
//! the SOS trigger over the socket.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{Json, Response},
    routing::get,
    Router,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use super::AppState;
use crate::logging;
use crate::models::Notification;
use crate::services::AlertSnapshot;

/// Server → client messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// A user-facing notification
    Notification { payload: Notification },
    /// SOS state after a change
    AlertState { payload: AlertSnapshot },
    Pong,
}

/// Client → server messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Press the SOS trigger
    Trigger,
    Ping,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(recent_notifications))
}

/// Most recent notifications, newest first
pub async fn recent_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.notifications.recent())
}

/// Upgrade to the live notification feed
pub async fn websocket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    logging::log_websocket_connected(&connection_id);

    let (mut sender, mut receiver) = socket.split();
    let mut notifications = state.notifications.subscribe();
    let mut alerts = state.alerts.subscribe();

    let initial = alerts.borrow_and_update().clone();
    if send(&mut sender, &ServerMessage::AlertState { payload: initial })
        .await
        .is_err()
    {
        logging::log_websocket_disconnected(&connection_id, "initial send failed");
        return;
    }

    let reason = loop {
        tokio::select! {
            received = notifications.recv() => match received {
                Ok(payload) => {
                    if send(&mut sender, &ServerMessage::Notification { payload }).await.is_err() {
                        break "send failed";
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(connection_id = %connection_id, skipped, "WebSocket client lagging");
                }
                Err(RecvError::Closed) => break "notification feed closed",
            },
            changed = alerts.changed() => {
                if changed.is_err() {
                    break "alert controller dropped";
                }
                let payload = alerts.borrow_and_update().clone();
                if send(&mut sender, &ServerMessage::AlertState { payload }).await.is_err() {
                    break "send failed";
                }
            }
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(ClientMessage::Trigger) => {
                            state.alerts.trigger();
                        }
                        Ok(ClientMessage::Ping) => {
                            if send(&mut sender, &ServerMessage::Pong).await.is_err() {
                                break "send failed";
                            }
                        }
                        Err(err) => {
                            tracing::debug!(connection_id = %connection_id, error = %err, "Ignoring malformed client message");
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => break "client closed",
                Some(Ok(_)) => {}
                Some(Err(_)) => break "receive error",
            },
        }
    };

    logging::log_websocket_disconnected(&connection_id, reason);
}

async fn send(
    sender: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let text = serde_json::to_string(message).map_err(axum::Error::new)?;
    sender.send(Message::Text(text)).await
}
