//! Black-box decoder contract
//!
//! The native media engine is opaque: the player drives it through the
//! narrow `Decoder` surface below and receives data back through sink
//! traits, invoked from the decoder's own worker threads (at minimum one
//! for audio delivery, one for video lock/display, one for event
//! notification). Sink implementations must be non-blocking and must
//! tolerate being called after the owning player detached them.
//!
//! This is the capability-object rendering of a C-style
//! function-pointer-plus-context callback contract: the sinks are
//! registered once per session and the decoder adapter translates its
//! native calls into trait calls, keeping domain logic free of raw
//! context-pointer casting.

use crate::error::Result;
use crate::format::FourCc;
use crate::sample::FrameLock;
use crate::source::ByteStream;
use crate::state::{NativeEvent, NativeState};
use crate::stats::DecoderStats;
use crate::time::ClockTime;
use crate::track::{TrackDescription, TrackKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sink for native event tags, invoked from decoder threads.
pub trait NativeEventSink: Send + Sync {
    /// Deliver one event tag. Must be non-blocking.
    fn notify(&self, event: NativeEvent);
}

/// Audio format proposed by the decoder during negotiation.
///
/// The sink may rewrite the fields in place to steer the decoder toward a
/// supported delivery format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSetupRequest {
    /// Proposed sample encoding
    pub codec: FourCc,

    /// Proposed sample rate in frames per second
    pub sample_rate: u32,

    /// Proposed channel count
    pub channels: u32,
}

/// Video format proposed by the decoder during negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSetupRequest {
    /// Proposed chroma (pixel format) code; may be rewritten in place
    pub chroma: FourCc,

    /// Proposed buffer width in pixels
    pub width: u32,

    /// Proposed buffer height in pixels; may be rewritten in place
    pub height: u32,

    /// Number of planes the proposed chroma decodes into, from the
    /// decoder's own format description
    pub plane_count: u32,
}

/// Buffer layout for the single negotiated output plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoPlaneLayout {
    /// Bytes per pixel row
    pub pitch: u32,

    /// Number of rows
    pub lines: u32,
}

/// Audio delivery callbacks, invoked from the decoder's audio thread.
pub trait AudioCallbacks: Send + Sync {
    /// Negotiate the delivery format, rewriting `request` in place where
    /// needed. Returns false when no sink is attached.
    fn audio_setup(&self, request: &mut AudioSetupRequest) -> bool;

    /// The decoder tore down its audio output.
    fn audio_cleanup(&self);

    /// Deliver `frames` frames of interleaved samples. `timestamp` is the
    /// decoder-side presentation time in microseconds on the sink's
    /// reference clock.
    fn audio_play(&self, samples: &[u8], frames: u32, timestamp: i64);

    /// Playback paused (handled at tick time; informational).
    fn audio_pause(&self, timestamp: i64);

    /// Playback resumed (handled at tick time; informational).
    fn audio_resume(&self, timestamp: i64);

    /// Pending buffers should be discarded.
    fn audio_flush(&self, timestamp: i64);

    /// Pending buffers should be played out.
    fn audio_drain(&self);
}

/// Video delivery callbacks, invoked from the decoder's video thread.
///
/// For every frame the decoder calls `video_lock`, writes the plane, and
/// hands the lock back through `video_display`. The lock always carries a
/// valid buffer - on pipeline failure it is scratch storage the display
/// call discards.
pub trait VideoCallbacks: Send + Sync {
    /// Negotiate the buffer layout, rewriting `request` in place where
    /// needed. `None` rejects the format (zero planes).
    fn video_setup(&self, request: &mut VideoSetupRequest) -> Option<VideoPlaneLayout>;

    /// The decoder tore down its video output.
    fn video_cleanup(&self);

    /// Borrow a writable frame buffer for one frame.
    fn video_lock(&self) -> FrameLock;

    /// Return a written frame for presentation.
    fn video_display(&self, frame: FrameLock);
}

/// 360-degree view parameters pushed to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    /// Yaw in degrees
    pub yaw: f32,

    /// Pitch in degrees
    pub pitch: f32,

    /// Roll in degrees
    pub roll: f32,

    /// Field of view in degrees
    pub field_of_view: f32,
}

impl Default for Viewpoint {
    fn default() -> Self {
        Viewpoint {
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            field_of_view: 90.0,
        }
    }
}

/// The opaque native media decoder.
///
/// All methods take `&self`: implementations are internally synchronized,
/// and the player shares the instance with its callback sinks.
pub trait Decoder: Send + Sync {
    /// Live playback state. Sampled (never cached) by the player.
    fn native_state(&self) -> NativeState;

    /// Current playback rate.
    fn rate(&self) -> f32;

    /// Ask for a new playback rate; false if the decoder refuses it.
    fn set_rate(&self, rate: f32) -> bool;

    /// Start or resume playback; false on failure.
    fn play(&self) -> bool;

    /// Pause playback.
    fn pause(&self);

    /// Stop playback.
    fn stop(&self);

    /// Whether the current media can be paused.
    fn can_pause(&self) -> bool;

    /// Whether the current media is seekable.
    fn is_seekable(&self) -> bool;

    /// Move playback to an absolute time.
    fn set_time(&self, time: ClockTime);

    /// Total media duration, zero if unknown.
    fn duration(&self) -> ClockTime;

    /// Statistics snapshot, if available.
    fn stats(&self) -> Option<DecoderStats> {
        None
    }

    /// Native video output size, if known yet.
    fn video_size(&self) -> Option<(u32, u32)> {
        None
    }

    /// Attach the notification sink for native events.
    fn attach_event_sink(&self, sink: Arc<dyn NativeEventSink>) -> Result<()>;

    /// Detach the notification sink.
    fn detach_event_sink(&self);

    /// Register (or with `None`, clear) the audio delivery sink.
    fn set_audio_callbacks(&self, callbacks: Option<Arc<dyn AudioCallbacks>>);

    /// Register (or with `None`, clear) the video delivery sink.
    fn set_video_callbacks(&self, callbacks: Option<Arc<dyn VideoCallbacks>>);

    /// Enumerate the streams of `kind`.
    fn track_descriptions(&self, kind: TrackKind) -> Vec<TrackDescription> {
        let _ = kind;
        Vec::new()
    }

    /// Decoder id of the selected track of `kind`, if any.
    fn selected_track(&self, kind: TrackKind) -> Option<i32> {
        let _ = kind;
        None
    }

    /// Select a track by decoder id; `None` deselects. False if refused.
    fn select_track(&self, kind: TrackKind, id: Option<i32>) -> bool {
        let _ = (kind, id);
        false
    }

    /// Push a 360-degree viewpoint; false if unsupported or refused.
    fn set_viewpoint(&self, viewpoint: Viewpoint) -> bool {
        let _ = viewpoint;
        false
    }
}

/// Creates decoder instances from media inputs.
///
/// The locator string and the byte stream are opaque to the player; the
/// factory owns any environment the decoder needs.
pub trait DecoderFactory: Send + Sync {
    /// Create a decoder for a locator string (URL, path, device, ...).
    fn from_location(&self, location: &str) -> Result<Arc<dyn Decoder>>;

    /// Create a decoder that pulls bytes through the session shim.
    fn from_byte_stream(&self, stream: ByteStream) -> Result<Arc<dyn Decoder>>;
}
