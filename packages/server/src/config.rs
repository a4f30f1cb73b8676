//! Server configuration (command line, overridable from the environment).

use clap::Parser;

/// Frames buffered per connection before events to it are dropped
pub const DEFAULT_OUTBOUND_QUEUE: usize = 256;

/// Real-time board hub: board subscriptions, presence and event fan-out over WebSocket
#[derive(Debug, Clone, Parser)]
#[command(name = "kanban-realtime-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "KANBAN_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "KANBAN_PORT", default_value_t = 5001)]
    pub port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "KANBAN_LOG", default_value = "info")]
    pub log_level: String,

    /// Outbound frames buffered per connection; a subscriber that falls
    /// further behind misses events until it catches up
    #[arg(
        long,
        env = "KANBAN_OUTBOUND_QUEUE",
        default_value_t = DEFAULT_OUTBOUND_QUEUE,
        value_parser = parse_queue_capacity
    )]
    pub outbound_queue: usize,
}

fn parse_queue_capacity(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(capacity) => Ok(capacity),
        Err(e) => Err(e.to_string()),
    }
}

impl ServerConfig {
    /// `host:port` string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
            log_level: "info".to_string(),
            outbound_queue: DEFAULT_OUTBOUND_QUEUE,
        }
    }
}
