//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{CodeSnapshot, DisplayName, ParticipantId, RoomId},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: events produced by the
/// use-cases (via rx channel) are sent to this client's WebSocket connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Allocate an identity and announce it (CONNECTING)
    let participant_id = match state.connect_participant_usecase.execute(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to accept connection: {}", e);
            return;
        }
    };
    tracing::info!("Client '{}' connected", participant_id);

    // Spawn a task to push events from the relay to this client
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive events from this client
    let state_clone = state.clone();
    let participant_id_clone = participant_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error from '{}': {}", participant_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!(
                        "Received text from '{}': {}",
                        participant_id_clone,
                        text.as_str()
                    );
                    if let Err(reason) =
                        handle_client_event(&state_clone, &participant_id_clone, text.as_str())
                            .await
                    {
                        tracing::warn!(
                            "Rejected event from '{}': {}",
                            participant_id_clone,
                            reason
                        );
                        state_clone
                            .connect_participant_usecase
                            .reject(&participant_id_clone, reason)
                            .await;
                    }
                }
                Message::Binary(_) => {
                    state_clone
                        .connect_participant_usecase
                        .reject(&participant_id_clone, "binary frames are not supported")
                        .await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", participant_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Transport closed: leave and network loss are handled the same way
    match state
        .disconnect_participant_usecase
        .execute(&participant_id)
        .await
    {
        Ok(Some(outcome)) => {
            tracing::info!(
                "Client '{}' left room '{}' ({} remaining notified)",
                participant_id,
                outcome.room_id,
                outcome.notified.len()
            );
        }
        Ok(None) => {
            tracing::info!("Client '{}' disconnected before joining", participant_id);
        }
        Err(e) => {
            tracing::warn!("Failed to disconnect participant '{}': {}", participant_id, e);
        }
    }
}

/// Decode one frame and route it to its use-case.
///
/// Returns the rejection reason to report back to the sender.
async fn handle_client_event(
    state: &AppState,
    participant_id: &ParticipantId,
    text: &str,
) -> Result<(), String> {
    let event =
        ClientEvent::from_json(text).map_err(|e| format!("malformed event: {}", e))?;

    match event {
        ClientEvent::Join { room_id, username } => {
            let room_id = RoomId::try_from(room_id).map_err(|e| e.to_string())?;
            let display_name = DisplayName::try_from(username).map_err(|e| e.to_string())?;
            let outcome = state
                .join_room_usecase
                .execute(participant_id.clone(), room_id, display_name)
                .await
                .map_err(|e| e.to_string())?;
            tracing::info!(
                "Client '{}' joined room '{}' as '{}' ({} members, seeded: {})",
                participant_id,
                outcome.room_id,
                outcome.participant.display_name.as_str(),
                outcome.members.len(),
                outcome.seeded
            );
        }
        ClientEvent::CodeChange { room_id, code } => {
            let room_id = RoomId::try_from(room_id).map_err(|e| e.to_string())?;
            let code = CodeSnapshot::try_from(code).map_err(|e| e.to_string())?;
            let targets = state
                .change_code_usecase
                .execute(participant_id, room_id, code)
                .await
                .map_err(|e| e.to_string())?;
            tracing::debug!(
                "Relayed CODE_CHANGE from '{}' to {} members",
                participant_id,
                targets.len()
            );
        }
        ClientEvent::SyncCode { code, socket_id } => {
            let target = ParticipantId::try_from(socket_id).map_err(|e| e.to_string())?;
            let code = CodeSnapshot::try_from(code).map_err(|e| e.to_string())?;
            state
                .sync_code_usecase
                .execute(participant_id, target, code)
                .await
                .map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}
