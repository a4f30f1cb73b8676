//! Server state shared by all handlers.

use std::sync::Arc;

use crate::domain::BoardHubRepository;

/// Shared application state
///
/// Created once at startup and handed to every handler; the hub it wraps
/// lives exactly as long as the server.
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn BoardHubRepository>,
    /// Capacity of each connection's outbound queue
    pub outbound_queue: usize,
}

impl AppState {
    pub fn new(repository: Arc<dyn BoardHubRepository>, outbound_queue: usize) -> Self {
        Self {
            repository,
            outbound_queue,
        }
    }
}
