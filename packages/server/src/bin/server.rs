//! Real-time board hub server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kanban-realtime-server -- --port 5001
//! ```

use clap::Parser;
use kanban_realtime_server::ServerConfig;
use kanban_realtime_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = kanban_realtime_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
