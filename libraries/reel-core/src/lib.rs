//! Reel Player - Core Types and Decoder Contract
//!
//! Shared foundation for the Reel Player playback bridge:
//! - Player clock time (`ClockTime`) - the locally authoritative playback
//!   timestamp, distinct from the decoder's own (unreliable) time reporting
//! - State and event enums (`NativeState`, `PlayerState`, `NativeEvent`,
//!   `MediaEvent`) and the derived-state mapping between them
//! - Sample formats and descriptors (`FourCc`, `AudioFormat`, `VideoFormat`)
//! - Pooled sample storage (`SamplePool`, `AudioSample`, `VideoSample`)
//! - The black-box decoder contract (`Decoder`, `DecoderFactory`) and the
//!   callback-sink traits the decoder invokes from its worker threads
//! - Seekable byte sources (`ByteSource`) and the pull-based session shim
//!   (`ByteStream`) that lets a decoder read from in-process bytes
//!
//! # Architecture
//!
//! `reel-core` is completely decoder-agnostic: the native media engine is
//! driven through the `Decoder` trait and talks back through sink traits,
//! so the playback crate never touches a raw callback context pointer.

pub mod decoder;
pub mod error;
pub mod format;
pub mod pool;
pub mod sample;
pub mod source;
pub mod state;
pub mod stats;
pub mod time;
pub mod track;

pub use decoder::{
    AudioCallbacks, AudioSetupRequest, Decoder, DecoderFactory, NativeEventSink,
    VideoCallbacks, VideoPlaneLayout, VideoSetupRequest, Viewpoint,
};
pub use error::{DecoderError, Result};
pub use format::{AudioFormat, AudioSampleFormat, FourCc, VideoFormat, VideoSampleFormat};
pub use pool::{PoolLease, SampleBuffer, SamplePool};
pub use sample::{AudioSample, FrameLock, VideoSample};
pub use source::{ByteSource, ByteStream, MemoryByteSource};
pub use state::{Capability, MediaEvent, NativeEvent, NativeState, PlayerState, PlayerStatus};
pub use stats::DecoderStats;
pub use time::ClockTime;
pub use track::{TrackDescription, TrackKind};
