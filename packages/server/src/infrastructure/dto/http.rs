//! HTTP API request/response DTOs for the board hub.

use serde::{Deserialize, Serialize};

use crate::domain::BoardEvent;

/// Body of `POST /api/boards/{board_id}/events`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastRequest {
    pub event: BoardEvent,
    /// Connection that should not receive its own echo
    #[serde(default)]
    pub except_connection_id: Option<String>,
}

/// Response of `POST /api/boards/{board_id}/events`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastAcceptedDto {
    pub board_id: String,
    pub event: String,
    pub delivered: usize,
    pub failed: usize,
}

/// Response of `GET /api/boards/{board_id}/connections`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConnectionsDto {
    pub board_id: String,
    pub subscribers: Vec<String>,
    pub online: Vec<OnlineUserDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineUserDto {
    pub user_id: String,
    pub connection_id: String,
    pub announced_at: String, // ISO 8601
}
