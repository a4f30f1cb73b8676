//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{broadcast_board_event, get_board_connections, health_check};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
