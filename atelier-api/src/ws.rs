//! WebSocket endpoint for live change notifications
//!
//! The socket handshake authenticates with the same bearer token as the HTTP
//! surface, passed as a query parameter. Each socket becomes one viewer
//! session; incoming messages are routed to the room broadcaster and outbound
//! room events are drained from the session's bounded outbox.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use atelier_core::core_proto::{self, ClientMessage};
use atelier_core::core_room::SessionHandle;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::Response,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: String,
}

/// GET /ws?token=… - Upgrade to a viewer session socket
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let principal = state
        .signer
        .verify(&params.token)
        .map_err(ApiError::from)?;

    Ok(ws.on_upgrade(move |socket| handle_socket(state, socket, principal.user_id)))
}

async fn handle_socket(
    state: AppState,
    mut socket: WebSocket,
    user_id: atelier_core::core_model::UserId,
) {
    let session = SessionHandle::new(user_id.clone(), state.session_queue_depth);
    info!(session_id = %session.session_id(), user_id = %user_id, "Viewer session opened");

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(message) => {
                                core_proto::dispatch(&state.rooms, &session, message).await;
                            }
                            Err(e) => {
                                debug!(session_id = %session.session_id(), error = %e,
                                    "Ignoring unparseable client message");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(session_id = %session.session_id(), error = %e, "Socket read error");
                        break;
                    }
                }
            }
            event = session.outbox().recv() => {
                let Some(event) = event else { break };
                let payload = match serde_json::to_string(&event) {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(session_id = %session.session_id(), error = %e,
                            "Failed to encode room event");
                        continue;
                    }
                };
                if socket.send(Message::Text(payload)).await.is_err() {
                    break;
                }
            }
        }
    }

    // Session teardown: leave every room, then drop the outbox
    state.rooms.disconnect(session.session_id()).await;
    session.outbox().close();
    info!(session_id = %session.session_id(), user_id = %user_id, "Viewer session closed");
}
