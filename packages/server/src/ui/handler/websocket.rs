//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{BoardId, ConnectionId, ConnectionIdFactory, UserId},
    infrastructure::dto::websocket::{ClientMessage, ConnectedMessage, ErrorMessage, MessageType},
    ui::state::AppState,
    usecase::{
        AnnouncePresenceUseCase, ConnectClientUseCase, DisconnectClientUseCase,
        SubscribeBoardUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();

    // Bounded queue through which the hub (and this handler) push frames to the client
    let (tx, mut rx) = mpsc::channel::<String>(state.outbound_queue);

    let connect_usecase = ConnectClientUseCase::new(state.repository.clone());
    let connected_at = match connect_usecase.execute(connection_id.clone(), tx.clone()).await {
        Ok(connected_at) => connected_at,
        Err(e) => {
            tracing::warn!("Rejecting connection '{}': {}", connection_id, e);
            return;
        }
    };
    tracing::info!("Connection '{}' opened", connection_id);

    // The connection has no subscriptions yet, so this is always the first frame
    let connected_msg = ConnectedMessage {
        r#type: MessageType::Connected,
        connection_id: connection_id.as_str().to_string(),
        connected_at: connected_at.value(),
    };
    match serde_json::to_string(&connected_msg) {
        Ok(json) => {
            let _ = tx.try_send(json);
        }
        Err(e) => tracing::error!("Failed to encode connected message: {}", e),
    }

    let (mut sender, mut receiver) = socket.split();

    // Spawn a task to drain this connection's channel into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Spawn a task to receive frames from this client
    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", recv_connection_id, text);
                    let result = match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => {
                            dispatch_client_message(&recv_state, &recv_connection_id, client_msg)
                                .await
                        }
                        Err(e) => Err(format!("Malformed frame: {e}")),
                    };
                    if let Err(reason) = result {
                        tracing::warn!(
                            "Rejected frame from '{}': {}",
                            recv_connection_id,
                            reason
                        );
                        send_error(&tx, reason);
                    }
                }
                Message::Binary(_) => {
                    send_error(&tx, "Binary frames are not supported".to_string());
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
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

    let disconnect_usecase = DisconnectClientUseCase::new(state.repository.clone());
    let outcome = disconnect_usecase.execute(&connection_id).await;
    if let Some(presence) = outcome.presence {
        tracing::info!(
            "User '{}' went offline on board '{}'",
            presence.user_id,
            presence.board_id
        );
    }
}

/// Apply one inbound frame. Returns a human-readable reason on rejection.
async fn dispatch_client_message(
    state: &AppState,
    connection_id: &ConnectionId,
    msg: ClientMessage,
) -> Result<(), String> {
    match msg {
        ClientMessage::JoinBoard { board_id } => {
            let board_id = BoardId::try_from(board_id).map_err(|e| e.to_string())?;
            SubscribeBoardUseCase::new(state.repository.clone())
                .subscribe(connection_id, &board_id)
                .await;
        }
        ClientMessage::LeaveBoard { board_id } => {
            let board_id = BoardId::try_from(board_id).map_err(|e| e.to_string())?;
            SubscribeBoardUseCase::new(state.repository.clone())
                .unsubscribe(connection_id, &board_id)
                .await;
        }
        ClientMessage::UserOnline { user_id, board_id } => {
            let user_id = UserId::try_from(user_id).map_err(|e| e.to_string())?;
            let board_id = BoardId::try_from(board_id).map_err(|e| e.to_string())?;
            AnnouncePresenceUseCase::new(state.repository.clone())
                .execute(connection_id, &user_id, &board_id)
                .await
                .map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

fn send_error(tx: &mpsc::Sender<String>, reason: String) {
    match serde_json::to_string(&ErrorMessage::new(reason)) {
        Ok(json) => {
            if let Err(e) = tx.try_send(json) {
                tracing::debug!("Dropped error reply: {}", e);
            }
        }
        Err(e) => tracing::error!("Failed to encode error message: {}", e),
    }
}
