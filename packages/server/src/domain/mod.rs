//! Domain layer for the board hub.
//!
//! This module contains the subscription and presence bookkeeping and the
//! event model, independent of transport DTOs and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod presence;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{PresenceEntry, PresenceStatus, Subscription};
pub use error::{RepositoryError, ValueObjectError};
pub use event::{
    BoardEvent, BoardSettings, BoardSnapshot, ColumnSnapshot, MemberRole, Subtask, TaskMove,
    TaskPriority, TaskSnapshot, UserSummary,
};
pub use factory::ConnectionIdFactory;
pub use presence::PresenceTracker;
pub use registry::ConnectionRegistry;
pub use repository::{BoardHubRepository, DeliveryReport};
#[cfg(test)]
pub use repository::MockBoardHubRepository;
pub use value_object::{BoardId, ConnectionId, Timestamp, UserId};
