//! Utilities shared by the Kanban Realtime server and client.

pub mod logger;
pub mod time;
