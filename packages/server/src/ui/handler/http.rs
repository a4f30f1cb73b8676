//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use kanban_realtime_shared::time::{millis_to_rfc3339, now_millis};

use crate::{
    domain::{BoardId, ConnectionId},
    infrastructure::dto::http::{
        BoardConnectionsDto, BroadcastAcceptedDto, BroadcastRequest, OnlineUserDto,
    },
    ui::state::AppState,
    usecase::{BroadcastEventUseCase, SubscribeBoardUseCase},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": millis_to_rfc3339(now_millis()),
    }))
}

/// Push an already persisted board change to the board's subscribers.
///
/// Responds `202 Accepted` once the event has been handed to every
/// subscriber's channel. The counts are informational: a closed connection
/// is never an error for the caller.
pub async fn broadcast_board_event(
    State(state): State<Arc<AppState>>,
    Path(board_id): Path<String>,
    Json(request): Json<BroadcastRequest>,
) -> Result<(StatusCode, Json<BroadcastAcceptedDto>), StatusCode> {
    let board_id = BoardId::try_from(board_id).map_err(|e| {
        tracing::warn!("Rejected broadcast: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    let except = request
        .except_connection_id
        .map(ConnectionId::try_from)
        .transpose()
        .map_err(|e| {
            tracing::warn!("Rejected broadcast to board '{}': {}", board_id, e);
            StatusCode::BAD_REQUEST
        })?;

    let usecase = BroadcastEventUseCase::new(state.repository.clone());
    let report = usecase
        .execute(&board_id, &request.event, except)
        .await
        .map_err(|e| {
            tracing::error!("Broadcast to board '{}' failed: {}", board_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((
        StatusCode::ACCEPTED,
        Json(BroadcastAcceptedDto {
            board_id: board_id.into_string(),
            event: request.event.kind().to_string(),
            delivered: report.delivered,
            failed: report.failed,
        }),
    ))
}

/// Current subscribers and online users of a board (diagnostics)
pub async fn get_board_connections(
    State(state): State<Arc<AppState>>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardConnectionsDto>, StatusCode> {
    let board_id = BoardId::try_from(board_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let usecase = SubscribeBoardUseCase::new(state.repository.clone());
    let mut subscribers: Vec<String> = usecase
        .subscribers_of(&board_id)
        .await
        .into_iter()
        .map(ConnectionId::into_string)
        .collect();
    subscribers.sort();

    let mut online: Vec<OnlineUserDto> = state
        .repository
        .online_on(&board_id)
        .await
        .into_iter()
        .map(|entry| OnlineUserDto {
            user_id: entry.user_id.into_string(),
            connection_id: entry.connection_id.into_string(),
            announced_at: millis_to_rfc3339(entry.announced_at.value()),
        })
        .collect();
    // Sort by user_id for consistent ordering
    online.sort_by(|a, b| a.user_id.cmp(&b.user_id));

    Ok(Json(BoardConnectionsDto {
        board_id: board_id.into_string(),
        subscribers,
        online,
    }))
}
