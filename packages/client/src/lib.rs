//! Terminal client for the board hub.
//!
//! Connects to the hub over WebSocket, joins boards, announces presence and
//! prints every pushed board event.

pub mod command;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

// Re-export entry points
pub use config::ClientConfig;
pub use session::run_client;
