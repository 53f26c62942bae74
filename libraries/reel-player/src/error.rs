//! Error types for the playback bridge

use thiserror::Error;

/// Player errors.
///
/// Only lifecycle failures surface as errors; control operations return
/// plain booleans and pipeline failures degrade to dropped samples,
/// because decoder threads must never be allowed to unwind.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The media locator or byte source was unusable
    #[error("Failed to open media: {0}")]
    OpenFailed(String),

    /// The decoder could not be created or attached
    #[error(transparent)]
    Decoder(#[from] reel_core::DecoderError),
}

/// Result type for player operations.
pub type Result<T> = std::result::Result<T, PlayerError>;
