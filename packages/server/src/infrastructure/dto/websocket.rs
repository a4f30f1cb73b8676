//! WebSocket message DTOs for the board hub.
//!
//! Every key on the socket is camelCase. Frame `type` names of the socket
//! protocol itself (`join-board`, `connected`, ...) are kebab-case.

use serde::{Deserialize, Serialize};

use crate::domain::BoardEvent;

/// Frames a client may send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Start receiving events of a board
    JoinBoard { board_id: String },
    /// Stop receiving events of a board
    LeaveBoard { board_id: String },
    /// Announce which user is behind this connection, on which board
    UserOnline { user_id: String, board_id: String },
}

/// Message type enum for hub-originated frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    Connected,
    Error,
}

/// First frame on every connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub r#type: MessageType,
    pub connection_id: String,
    /// Unix timestamp (milliseconds since epoch, UTC)
    pub connected_at: i64,
}

/// Reply to a frame the hub could not accept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub r#type: MessageType,
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            r#type: MessageType::Error,
            message: message.into(),
        }
    }
}

/// A board event as pushed to subscribers:
/// `{"type": ..., "boardId": ..., "payload": ..., "sentAt": ...}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEventMessage<'a> {
    pub board_id: &'a str,
    #[serde(flatten)]
    pub event: &'a BoardEvent,
    /// Unix timestamp (milliseconds since epoch, UTC)
    pub sent_at: i64,
}
