//! Error types for the CodeSync client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The WebSocket handshake failed
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The transport broke after the session was established
    #[error("Transport error: {0}")]
    TransportError(String),

    /// An outgoing event could not be encoded
    #[error("Failed to encode event: {0}")]
    EncodeError(#[from] serde_json::Error),

    /// The remote execution service failed or answered badly
    #[error("Execution failed: {0}")]
    ExecutionError(String),
}
