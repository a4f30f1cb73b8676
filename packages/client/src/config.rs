//! Client configuration.

use clap::Parser;

/// Watch live kanban board events from the terminal
#[derive(Debug, Clone, Parser)]
#[command(name = "kanban-realtime-client", version, about)]
pub struct ClientConfig {
    /// WebSocket endpoint of the board hub
    #[arg(long, env = "KANBAN_SERVER_URL", default_value = "ws://127.0.0.1:5001/ws")]
    pub url: String,

    /// Boards to join right after connecting (repeatable)
    #[arg(short, long = "board")]
    pub boards: Vec<String>,

    /// Announce this user online on the first joined board
    #[arg(short, long)]
    pub user: Option<String>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "KANBAN_LOG", default_value = "warn")]
    pub log_level: String,
}
