//! Which user each connection announced itself as.
//!
//! At most one entry per connection. A later announcement replaces the
//! earlier one even when it names a different board; the replaced board gets
//! no offline notice.

use std::collections::HashMap;

use super::{
    entity::PresenceEntry,
    value_object::{BoardId, ConnectionId, UserId},
};

#[derive(Debug, Default)]
pub struct PresenceTracker {
    entries: HashMap<ConnectionId, PresenceEntry>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an online announcement and return the entry it replaced, if any.
    pub fn announce_online(
        &mut self,
        connection_id: ConnectionId,
        user_id: UserId,
        board_id: BoardId,
    ) -> Option<PresenceEntry> {
        let entry = PresenceEntry::online(connection_id.clone(), user_id, board_id);
        self.entries.insert(connection_id, entry)
    }

    /// Remove and return the entry of a connection.
    pub fn take(&mut self, connection_id: &ConnectionId) -> Option<PresenceEntry> {
        self.entries.remove(connection_id)
    }

    /// Entries currently pointing at a board.
    pub fn online_on(&self, board_id: &BoardId) -> Vec<PresenceEntry> {
        self.entries
            .values()
            .filter(|entry| &entry.board_id == board_id)
            .cloned()
            .collect()
    }
}
