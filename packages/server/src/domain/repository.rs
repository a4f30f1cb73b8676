//! Repository trait for the board hub.
//!
//! The use-case layer depends on this trait only; the concrete storage lives
//! in the infrastructure layer.

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use super::{
    entity::{PresenceEntry, Subscription},
    error::RepositoryError,
    value_object::{BoardId, ConnectionId, UserId},
};

/// Outcome of one fan-out. Informational only: it is logged, never used to retry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Subscribers whose outbound queue accepted the payload
    pub delivered: usize,
    /// Subscribers whose queue was full or already closed
    pub failed: usize,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardHubRepository: Send + Sync {
    /// Register the outbound queue of a freshly accepted connection.
    async fn register_connection(
        &self,
        connection_id: ConnectionId,
        sender: Sender<String>,
    ) -> Result<(), RepositoryError>;

    /// Drop the outbound queue. Returns `false` if it was not registered.
    async fn remove_connection(&self, connection_id: &ConnectionId) -> bool;

    async fn is_connected(&self, connection_id: &ConnectionId) -> bool;

    async fn count_connections(&self) -> usize;

    /// Returns `false` if the subscription already existed.
    async fn subscribe(&self, subscription: &Subscription) -> bool;

    /// Returns `false` if there was no such subscription.
    async fn unsubscribe(&self, subscription: &Subscription) -> bool;

    /// Remove all subscriptions of a connection, returning the boards it left.
    async fn unsubscribe_all(&self, connection_id: &ConnectionId) -> Vec<BoardId>;

    async fn subscribers_of(&self, board_id: &BoardId) -> Vec<ConnectionId>;

    /// Record an online announcement, returning the entry it replaced.
    async fn record_presence(
        &self,
        connection_id: &ConnectionId,
        user_id: &UserId,
        board_id: &BoardId,
    ) -> Option<PresenceEntry>;

    /// Remove and return the presence entry of a connection.
    async fn take_presence(&self, connection_id: &ConnectionId) -> Option<PresenceEntry>;

    async fn online_on(&self, board_id: &BoardId) -> Vec<PresenceEntry>;

    /// Push an encoded payload to every current subscriber of `board_id`
    /// except `except`. Never waits on a subscriber: one whose queue is full
    /// misses this payload. Lookup and sends happen without interleaving with
    /// other hub operations, so two calls for the same board reach each
    /// common subscriber in call order.
    async fn deliver(
        &self,
        board_id: &BoardId,
        payload: String,
        except: Option<ConnectionId>,
    ) -> DeliveryReport;
}
