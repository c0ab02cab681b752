//! Error types for the export writer crate

use thiserror::Error;

/// Errors that can occur while enriching, serializing, or appending records
#[derive(Debug, Error)]
pub enum ExportError {
    /// The record could not be serialized to (or parsed from) its line format.
    ///
    /// The record is not written when this occurs; no partial line is left
    /// behind.
    #[error("record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The underlying stream rejected an append or flush.
    ///
    /// Propagated unchanged from the sink; this crate performs no retry.
    #[error("stream write failed: {0}")]
    Io(#[from] std::io::Error),

    /// `write` was called after the writer's stream was closed.
    #[error("writer is closed; no further writes are valid")]
    Closed,
}

/// Result type alias for ExportError
pub type Result<T> = std::result::Result<T, ExportError>;
