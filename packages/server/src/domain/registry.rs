//! Board subscriptions of live connections.
//!
//! Two indexes are kept in step: `board -> connections` answers fan-out
//! lookups, `connection -> boards` lets a closing connection drop all its
//! subscriptions without scanning every board. Empty sets are removed so
//! neither map grows with boards nobody watches any more.

use std::collections::{HashMap, HashSet};

use super::{
    entity::Subscription,
    value_object::{BoardId, ConnectionId},
};

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    by_board: HashMap<BoardId, HashSet<ConnectionId>>,
    by_connection: HashMap<ConnectionId, HashSet<BoardId>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscription. Returns `false` if it already existed.
    pub fn subscribe(&mut self, subscription: &Subscription) -> bool {
        let Subscription {
            connection_id,
            board_id,
        } = subscription;
        let inserted = self
            .by_board
            .entry(board_id.clone())
            .or_default()
            .insert(connection_id.clone());
        if inserted {
            self.by_connection
                .entry(connection_id.clone())
                .or_default()
                .insert(board_id.clone());
        }
        inserted
    }

    /// Remove a subscription. Returns `false` if there was none.
    pub fn unsubscribe(&mut self, subscription: &Subscription) -> bool {
        let Subscription {
            connection_id,
            board_id,
        } = subscription;
        let removed = remove_from(&mut self.by_board, board_id, connection_id);
        if removed {
            remove_from(&mut self.by_connection, connection_id, board_id);
        }
        removed
    }

    /// Remove every subscription of a connection and return the boards it left.
    pub fn unsubscribe_all(&mut self, connection_id: &ConnectionId) -> Vec<BoardId> {
        let Some(boards) = self.by_connection.remove(connection_id) else {
            return Vec::new();
        };
        for board_id in &boards {
            remove_from(&mut self.by_board, board_id, connection_id);
        }
        boards.into_iter().collect()
    }

    /// Connections currently subscribed to a board (sender included).
    pub fn subscribers_of(&self, board_id: &BoardId) -> Vec<ConnectionId> {
        self.by_board
            .get(board_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }
}

fn remove_from<K, V>(map: &mut HashMap<K, HashSet<V>>, key: &K, value: &V) -> bool
where
    K: std::hash::Hash + Eq,
    V: std::hash::Hash + Eq,
{
    let Some(set) = map.get_mut(key) else {
        return false;
    };
    let removed = set.remove(value);
    if set.is_empty() {
        map.remove(key);
    }
    removed
}
