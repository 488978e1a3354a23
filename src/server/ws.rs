//! Control socket transport
//!
//! WebSocket endpoint carrying the control channel protocol. Each
//! connection joins the hub as one peer; incoming command text is parsed
//! for logging and relayed verbatim, and relayed messages flow back out on
//! the same socket.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};

use crate::control::{ClientFrame, Command, ServerFrame};

use super::routes::AppState;

/// `GET /control`: upgrade into the control channel
pub async fn control_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        if let Err(err) = run_control_socket(socket, state).await {
            tracing::debug!(error = %err, "Control socket closed with error");
        }
    })
}

/// Per-connection transport loop
///
/// Dropping out of this loop for any reason drops the peer, which
/// unregisters it and deactivates the feed.
async fn run_control_socket(
    socket: WebSocket,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (mut sink, mut stream) = socket.split();
    let mut peer = state.hub.join();

    loop {
        tokio::select! {
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientFrame>(&text) {
                            Ok(ClientFrame::Message { data }) => {
                                if data.is_empty() {
                                    continue;
                                }
                                log_command(&data);
                                peer.broadcast(&data);
                            }
                            Ok(ClientFrame::DisconnectRequest) => {
                                peer.request_disconnect();
                                // Confirmation goes to the requester only,
                                // never through the hub
                                let reply =
                                    serde_json::to_string(&ServerFrame::DisconnectConfirmed)?;
                                sink.send(Message::Text(reply)).await?;
                                break;
                            }
                            Err(err) => {
                                tracing::debug!(error = %err, "Ignoring malformed control frame");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // binary and ping/pong carry nothing here
                    Some(Err(err)) => {
                        tracing::debug!(error = %err, "Control socket read failed");
                        break;
                    }
                }
            }
            relayed = peer.recv() => {
                match relayed {
                    Some(data) => {
                        let frame = serde_json::to_string(&ServerFrame::Message { data })?;
                        sink.send(Message::Text(frame)).await?;
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}

/// Log what a command token means; relay is unaffected by the outcome
fn log_command(data: &str) {
    match Command::parse(data) {
        Command::Move(direction) => {
            tracing::info!(direction = %direction, "Move command");
        }
        Command::SetValue(value) => {
            tracing::info!(value = %value, "Set-value command");
        }
        Command::Unknown(_) => {
            tracing::debug!(token = %data, "Unrecognized command token");
        }
    }
}
