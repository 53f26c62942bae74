//! Player configuration

use serde::{Deserialize, Serialize};

/// Configuration for the playback bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Restart from zero when the end of the media is reached
    /// (default: false)
    pub looping: bool,

    /// Channel-count cap applied during audio format negotiation
    /// (default: 8)
    pub max_audio_channels: u32,

    /// Validity duration stamped on video samples, in milliseconds
    /// (default: 1)
    pub video_frame_duration_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            looping: false,
            max_audio_channels: 8,
            video_frame_duration_ms: 1,
        }
    }
}
