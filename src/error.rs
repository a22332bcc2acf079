//! Error types surfaced by handlers.

use thiserror::Error;

/// Errors a handler can return from [`Handler::handle`](crate::Handler::handle).
///
/// The facade swallows these; they only reach callers that drive a handler
/// directly.
#[derive(Debug, Error)]
pub enum Error {
    /// The output stream rejected the write.
    #[error("sink write failed: {0}")]
    Write(#[from] std::io::Error),

    /// A record could not be encoded as JSON.
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    /// A global `tracing` subscriber was already installed.
    #[error("tracing subscriber already installed: {0}")]
    TracingInit(#[from] tracing_subscriber::util::TryInitError),
}

pub type Result<T> = std::result::Result<T, Error>;
