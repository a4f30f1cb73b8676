//! Terminal client for the board hub.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kanban-realtime-client -- --board alpha --user u1
//! ```

use clap::Parser;
use kanban_realtime_client::ClientConfig;
use kanban_realtime_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ClientConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    if let Err(e) = kanban_realtime_client::run_client(config).await {
        tracing::error!("Client error: {}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }
}
