//! Real-time board hub for a collaborative kanban application.
//!
//! Live connections subscribe to boards over WebSocket; after a board change
//! is persisted, the request-processing layer posts the event to the hub,
//! which pushes it to every subscriber of that board. Connections may also
//! announce which user they are, producing online/offline presence events.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{ServerError, router, run as run_server};
