//! Core domain models for the board hub.

use serde::{Deserialize, Serialize};

use super::value_object::{BoardId, ConnectionId, Timestamp, UserId};

/// A connection's registered interest in one board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription {
    pub connection_id: ConnectionId,
    pub board_id: BoardId,
}

impl Subscription {
    pub fn new(connection_id: ConnectionId, board_id: BoardId) -> Self {
        Self {
            connection_id,
            board_id,
        }
    }
}

/// Online/offline status carried by presence events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Offline,
}

/// Which user a connection announced itself as, and on which board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEntry {
    pub connection_id: ConnectionId,
    pub user_id: UserId,
    pub board_id: BoardId,
    pub status: PresenceStatus,
    /// When the entry was (last) announced
    pub announced_at: Timestamp,
}

impl PresenceEntry {
    /// Create an online entry announced now.
    pub fn online(connection_id: ConnectionId, user_id: UserId, board_id: BoardId) -> Self {
        Self {
            connection_id,
            user_id,
            board_id,
            status: PresenceStatus::Online,
            announced_at: Timestamp::now(),
        }
    }
}
