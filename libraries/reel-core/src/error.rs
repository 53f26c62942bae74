//! Error types for the decoder contract

use thiserror::Error;

/// Errors surfaced while creating a decoder or attaching to it.
///
/// Pipeline failures (pool exhaustion, bad timestamps) never surface as
/// errors; they degrade to dropped samples or scratch buffers so decoder
/// threads are never allowed to unwind.
#[derive(Debug, Error)]
pub enum DecoderError {
    /// Decoder instance could not be created for the given media
    #[error("Failed to create decoder: {0}")]
    CreationFailed(String),

    /// The decoder exposes no event surface to attach to
    #[error("Failed to attach event sink: {0}")]
    AttachFailed(String),

    /// Media locator was empty or malformed
    #[error("Invalid media locator: {0}")]
    InvalidLocator(String),

    /// The byte source rejected the open
    #[error("Byte source error: {0}")]
    Source(#[from] std::io::Error),
}

/// Result type for decoder operations.
pub type Result<T> = std::result::Result<T, DecoderError>;
