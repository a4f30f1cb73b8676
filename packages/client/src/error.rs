//! Client error definitions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error("Failed to send frame: {0}")]
    Send(#[source] tokio_tungstenite::tungstenite::Error),

    #[error("Failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}
