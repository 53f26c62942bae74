//! Reel Player - Poll-Driven Playback Bridge
//!
//! Bridges an asynchronous, multi-threaded native media decoder to a
//! deterministic, poll-based consumer (a render/update loop that advances
//! once per frame).
//!
//! This crate provides:
//! - The tick-driven `Player`: open/close lifecycle, derived state
//!   machine, player-owned clock, and the playback control surface
//! - The event bridge: decoder-thread notifications funnel into an MPSC
//!   queue drained once per tick
//! - The sample pipeline: decoder callback threads deliver raw buffers
//!   that are format-negotiated, pooled, timestamped, and queued for
//!   non-blocking retrieval
//! - Thin collaborators for track enumeration, 360-degree view control,
//!   and statistics formatting
//!
//! # Architecture
//!
//! The decoder is a black box behind `reel_core::Decoder`; nothing here
//! depends on a concrete media engine. All producer-side work happens on
//! decoder threads and never blocks; the consumer drives everything else
//! by calling `Player::tick` once per frame and pulling samples at its
//! own cadence.
//!
//! # Example
//!
//! ```rust,no_run
//! use reel_player::{Player, PlayerConfig, EventSink};
//! use reel_core::{DecoderFactory, MediaEvent};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! struct LogSink;
//!
//! impl EventSink for LogSink {
//!     fn receive(&self, event: MediaEvent) {
//!         println!("media event: {:?}", event);
//!     }
//! }
//!
//! fn run(factory: Arc<dyn DecoderFactory>) {
//!     let mut player = Player::new(factory, Arc::new(LogSink), PlayerConfig::default());
//!     player.open("file:///movies/clip.mp4").unwrap();
//!     player.set_rate(1.0);
//!
//!     loop {
//!         player.tick(Duration::from_millis(16));
//!         for sample in player.pull_video_samples() {
//!             // upload sample.data() to a texture
//!             let _ = sample;
//!         }
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod player;
pub mod queue;
pub mod sink;
pub mod stats;
pub mod tracks;
pub mod view;

pub use config::PlayerConfig;
pub use error::{PlayerError, Result};
pub use events::{EventQueue, EventSink};
pub use player::Player;
pub use queue::SampleQueue;
pub use sink::CallbackSink;
pub use tracks::{Track, TrackSet};
pub use view::{Orientation, View};
