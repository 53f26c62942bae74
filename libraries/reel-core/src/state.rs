//! Player state machine and event types
//!
//! The player never stores its own state: `PlayerState` is re-derived every
//! tick from the decoder's live `NativeState`, so the bridge cannot drift
//! from the decoder's actual condition. Edge-triggered notifications travel
//! separately as `NativeEvent` tags and are mapped to consumer-facing
//! `MediaEvent`s at drain time.

use serde::{Deserialize, Serialize};

/// Raw playback state reported by the native decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NativeState {
    /// Nothing loaded yet
    Idle,

    /// Opening the media
    Opening,

    /// Buffering ahead of playback
    Buffering,

    /// Actively decoding and delivering samples
    Playing,

    /// Paused mid-stream
    Paused,

    /// Stopped (explicitly or never started)
    Stopped,

    /// Reached the end of the media
    Ended,

    /// Unrecoverable decoder error
    Error,
}

/// Coarse player state sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// No media open
    Closed,

    /// Opening or buffering
    Preparing,

    /// Playing
    Playing,

    /// Paused mid-stream
    Paused,

    /// Stopped or ended
    Stopped,

    /// Unrecoverable error; close and reopen to recover
    Error,
}

impl PlayerState {
    /// Derive the player state from the decoder's live reported state.
    ///
    /// `None` means no decoder is attached.
    pub fn from_native(state: Option<NativeState>) -> Self {
        match state {
            None => PlayerState::Closed,
            Some(NativeState::Error) => PlayerState::Error,
            Some(NativeState::Buffering | NativeState::Opening) => PlayerState::Preparing,
            Some(NativeState::Paused) => PlayerState::Paused,
            Some(NativeState::Playing) => PlayerState::Playing,
            Some(NativeState::Ended | NativeState::Idle | NativeState::Stopped) => {
                PlayerState::Stopped
            }
        }
    }
}

/// Coarse readiness status derived from the player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Nothing noteworthy
    None,

    /// Media is still being prepared
    Buffering,
}

/// Notification tag produced by decoder threads.
///
/// Carries no payload: actionable data (e.g. the parsed track list) is
/// re-queried from the decoder at drain time, because the decoder's own
/// objects remain the source of truth and may have changed again before
/// the tick runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NativeEvent {
    /// Media metadata changed
    MetaChanged,

    /// Decoder is buffering
    Buffering,

    /// Media was parsed; track lists are available
    ParsedChanged,

    /// Decoder started opening the media
    Opening,

    /// Playback reached the end of the media
    EndReached,

    /// Decoder paused
    Paused,

    /// Decoder started or resumed playing
    Playing,

    /// Playback position changed (seek completed)
    PositionChanged,

    /// Decoder stopped
    Stopped,
}

/// Coarse playback event delivered to the consumer's event sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Media was opened
    MediaOpened,

    /// Media was closed
    MediaClosed,

    /// Media is buffering
    MediaBuffering,

    /// Metadata changed
    MetadataChanged,

    /// Track lists changed
    TracksChanged,

    /// Playback reached the end of the media
    PlaybackEndReached,

    /// Playback was suspended
    PlaybackSuspended,

    /// Playback resumed
    PlaybackResumed,

    /// A seek completed
    SeekCompleted,
}

/// Playback control capability that can be queried before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    /// Pause playback
    Pause,

    /// Resume playback
    Resume,

    /// Seek to an absolute time
    Seek,

    /// Scrub while paused
    Scrub,
}
