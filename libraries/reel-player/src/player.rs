//! Tick-driven player
//!
//! `Player` owns one decoder session at a time and bridges its
//! asynchronous callbacks to a poll-based consumer. All state the
//! consumer observes is re-derived inside `tick`: native events queued by
//! decoder threads are drained once per tick in arrival order, then the
//! playback state, rate, and clock are recomputed from the decoder.
//!
//! The player clock is the source of truth for current time. It advances
//! by `delta * rate` only while the decoder reports Playing, is reset to
//! zero on open and on a loop restart, and is pushed to the callback sink
//! after every tick so samples are stamped consistently.

use crate::config::PlayerConfig;
use crate::error::{PlayerError, Result};
use crate::events::{EventQueue, EventSink};
use crate::queue::SampleQueue;
use crate::sink::CallbackSink;
use crate::stats::format_decoder_stats;
use crate::tracks::{Track, TrackSet};
use crate::view::{Orientation, View};
use reel_core::{
    AudioSample, ByteSource, ByteStream, Capability, ClockTime, Decoder, DecoderFactory,
    MediaEvent, NativeEvent, NativeState, PlayerState, PlayerStatus, TrackKind, VideoSample,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Poll-driven bridge around one native decoder session.
pub struct Player {
    factory: Arc<dyn DecoderFactory>,
    event_sink: Arc<dyn EventSink>,
    decoder: Option<Arc<dyn Decoder>>,

    events: Arc<EventQueue>,
    sink: Arc<CallbackSink>,
    audio_samples: SampleQueue<AudioSample>,
    video_samples: SampleQueue<VideoSample>,

    tracks: TrackSet,
    view: View,
    info: String,

    current_time: ClockTime,
    current_rate: f32,
    looping: bool,
}

impl Player {
    /// Create a player with no media opened.
    pub fn new(
        factory: Arc<dyn DecoderFactory>,
        event_sink: Arc<dyn EventSink>,
        config: PlayerConfig,
    ) -> Self {
        let audio_samples = SampleQueue::new();
        let video_samples = SampleQueue::new();

        let sink = Arc::new(CallbackSink::new(
            audio_samples.sender(),
            video_samples.sender(),
            config.max_audio_channels,
            Duration::from_millis(config.video_frame_duration_ms),
        ));

        Player {
            factory,
            event_sink,
            decoder: None,
            events: Arc::new(EventQueue::new()),
            sink,
            audio_samples,
            video_samples,
            tracks: TrackSet::default(),
            view: View::new(),
            info: String::new(),
            current_time: ClockTime::ZERO,
            current_rate: 0.0,
            looping: config.looping,
        }
    }

    /// Open media by locator (URL or file path), closing any previous
    /// session first.
    pub fn open(&mut self, locator: &str) -> Result<()> {
        self.close();

        if locator.is_empty() {
            return Err(PlayerError::OpenFailed("empty media locator".into()));
        }

        debug!(locator, "opening media");

        let decoder = self.factory.from_location(locator)?;
        self.finish_open(decoder)
    }

    /// Open media from an in-process byte source, closing any previous
    /// session first.
    pub fn open_byte_source(&mut self, source: Arc<dyn ByteSource>) -> Result<()> {
        self.close();

        if source.is_empty() {
            return Err(PlayerError::OpenFailed("empty byte source".into()));
        }

        debug!(size = source.len(), "opening media from byte source");

        let decoder = self.factory.from_byte_stream(ByteStream::new(source))?;
        self.finish_open(decoder)
    }

    fn finish_open(&mut self, decoder: Arc<dyn Decoder>) -> Result<()> {
        self.tracks.initialize(&decoder);
        self.rebuild_info();
        self.view.reset();

        CallbackSink::initialize(&self.sink, &decoder);

        if let Err(error) = decoder.attach_event_sink(self.events.clone()) {
            warn!(%error, "failed to attach event sink; releasing decoder");
            self.sink.shutdown();
            self.tracks.reset();
            self.info.clear();
            return Err(error.into());
        }

        self.current_rate = 0.0;
        self.current_time = ClockTime::ZERO;
        self.sink.set_current_time(ClockTime::ZERO);
        self.decoder = Some(decoder);

        self.event_sink.receive(MediaEvent::MediaOpened);

        Ok(())
    }

    /// Close the current session; safe to call repeatedly.
    pub fn close(&mut self) {
        let Some(decoder) = self.decoder.take() else {
            return;
        };

        debug!("closing media");

        self.sink.shutdown();
        decoder.detach_event_sink();
        decoder.stop();
        drop(decoder);

        self.audio_samples.flush();
        self.video_samples.flush();
        self.events.drain();

        self.tracks.reset();
        self.view.reset();
        self.info.clear();
        self.current_rate = 0.0;
        self.current_time = ClockTime::ZERO;

        self.event_sink.receive(MediaEvent::TracksChanged);
        self.event_sink.receive(MediaEvent::MediaClosed);
    }

    /// Advance the bridge by one frame: drain and apply queued native
    /// events, then re-derive rate and clock from the decoder.
    pub fn tick(&mut self, delta: Duration) {
        if self.decoder.is_none() {
            return;
        }

        for event in self.events.drain() {
            self.apply_native_event(event);
        }

        let Some(decoder) = &self.decoder else {
            return;
        };

        if decoder.native_state() == NativeState::Playing {
            self.current_rate = decoder.rate();
            self.current_time = self.current_time.advance(delta, self.current_rate);
        } else {
            self.current_rate = 0.0;
        }

        self.sink.set_current_time(self.current_time);
    }

    fn apply_native_event(&mut self, event: NativeEvent) {
        match event {
            NativeEvent::MetaChanged => {
                self.event_sink.receive(MediaEvent::MetadataChanged);
            }

            NativeEvent::Buffering => {
                self.event_sink.receive(MediaEvent::MediaBuffering);
            }

            NativeEvent::ParsedChanged => {
                if let Some(decoder) = self.decoder.clone() {
                    CallbackSink::initialize(&self.sink, &decoder);
                    self.tracks.initialize(&decoder);
                    self.rebuild_info();
                }
                self.event_sink.receive(MediaEvent::TracksChanged);
            }

            NativeEvent::Opening => {
                self.event_sink.receive(MediaEvent::MediaOpened);
            }

            NativeEvent::EndReached => {
                let previous_rate = self.current_rate;

                if let Some(decoder) = &self.decoder {
                    decoder.stop();
                }

                self.audio_samples.flush();
                self.video_samples.flush();
                self.event_sink.receive(MediaEvent::PlaybackEndReached);

                if self.looping && previous_rate != 0.0 {
                    debug!(rate = previous_rate, "looping back to start");
                    self.current_time = ClockTime::ZERO;
                    self.set_rate(previous_rate);
                } else {
                    self.event_sink.receive(MediaEvent::PlaybackSuspended);
                }
            }

            NativeEvent::Paused => {
                self.event_sink.receive(MediaEvent::PlaybackSuspended);
            }

            NativeEvent::Playing => {
                self.event_sink.receive(MediaEvent::PlaybackResumed);
            }

            NativeEvent::PositionChanged => {
                self.event_sink.receive(MediaEvent::SeekCompleted);
            }

            // attached for parity; carries no useful transition
            NativeEvent::Stopped => {}
        }
    }

    /// Derived playback state.
    pub fn state(&self) -> PlayerState {
        PlayerState::from_native(self.decoder.as_ref().map(|decoder| decoder.native_state()))
    }

    /// Transient activity indicator.
    pub fn status(&self) -> PlayerStatus {
        if self.state() == PlayerState::Preparing {
            PlayerStatus::Buffering
        } else {
            PlayerStatus::None
        }
    }

    /// Current playback position.
    pub fn time(&self) -> ClockTime {
        self.current_time
    }

    /// Effective playback rate (zero while not playing).
    pub fn rate(&self) -> f32 {
        self.current_rate
    }

    /// Total media duration, or zero with no media.
    pub fn duration(&self) -> ClockTime {
        match &self.decoder {
            Some(decoder) => decoder.duration(),
            None => ClockTime::ZERO,
        }
    }

    /// Jump to `time`. Refused while the decoder is opening, buffering,
    /// or errored; a seek to the current position is a successful no-op.
    pub fn seek(&mut self, time: ClockTime) -> bool {
        let Some(decoder) = &self.decoder else {
            return false;
        };

        if matches!(
            decoder.native_state(),
            NativeState::Opening | NativeState::Buffering | NativeState::Error
        ) {
            return false;
        }

        if time != self.current_time {
            debug!(%time, "seeking");
            decoder.set_time(time);
            self.current_time = time;
        }

        true
    }

    /// Change the playback rate. Rate zero pauses (refused when the
    /// media cannot pause); a nonzero rate starts playback when needed.
    pub fn set_rate(&mut self, rate: f32) -> bool {
        let Some(decoder) = &self.decoder else {
            return false;
        };

        if !decoder.set_rate(rate) {
            return false;
        }

        if rate.abs() < f32::EPSILON {
            if decoder.native_state() == NativeState::Playing {
                if !decoder.can_pause() {
                    return false;
                }

                decoder.pause();
            }
        } else if decoder.native_state() != NativeState::Playing && !decoder.play() {
            return false;
        }

        true
    }

    /// Restart from zero at the end of the media; consulted only when
    /// the end is actually reached.
    pub fn set_looping(&mut self, looping: bool) -> bool {
        self.looping = looping;
        true
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Whether `capability` is currently available.
    pub fn can_control(&self, capability: Capability) -> bool {
        let Some(decoder) = &self.decoder else {
            return false;
        };

        match capability {
            Capability::Pause => decoder.can_pause(),
            Capability::Resume => decoder.native_state() != NativeState::Playing,
            Capability::Seek | Capability::Scrub => decoder.is_seekable(),
        }
    }

    /// Take every decoded audio sample queued since the last pull.
    pub fn pull_audio_samples(&self) -> Vec<Arc<AudioSample>> {
        self.audio_samples.drain()
    }

    /// Take every decoded video frame queued since the last pull.
    pub fn pull_video_samples(&self) -> Vec<Arc<VideoSample>> {
        self.video_samples.drain()
    }

    /// Human-readable stream summary for the current media.
    pub fn get_info(&self) -> &str {
        &self.info
    }

    /// Human-readable decoder statistics.
    pub fn get_stats(&self) -> String {
        let Some(decoder) = &self.decoder else {
            return "No media opened.".into();
        };

        match decoder.stats() {
            Some(stats) => format_decoder_stats(&stats),
            None => "Stats currently not available.".into(),
        }
    }

    fn rebuild_info(&mut self) {
        self.info.clear();
        self.tracks.write_summary(&mut self.info);
    }

    /// The tracks of `kind` in the current media.
    pub fn tracks(&self, kind: TrackKind) -> &[Track] {
        self.tracks.tracks(kind)
    }

    /// Index of the selected track of `kind`, if any.
    pub fn selected_track(&self, kind: TrackKind) -> Option<usize> {
        let decoder = self.decoder.as_ref()?;
        self.tracks.selected_track(kind, decoder)
    }

    /// Select the track of `kind` at `index`; -1 deselects.
    pub fn select_track(&mut self, kind: TrackKind, index: i32) -> bool {
        let Some(decoder) = &self.decoder else {
            return false;
        };

        self.tracks.select_track(kind, index, decoder)
    }

    /// Horizontal and vertical field of view, in degrees.
    pub fn view_field(&self) -> (f32, f32) {
        self.view.view_field()
    }

    /// Current 360-degree view orientation.
    pub fn view_orientation(&self) -> Orientation {
        self.view.view_orientation()
    }

    /// Set the field of view; relative updates add to the current value.
    pub fn set_view_field(&mut self, horizontal: f32, vertical: f32, absolute: bool) -> bool {
        let Some(decoder) = &self.decoder else {
            return false;
        };

        self.view.set_view_field(horizontal, vertical, absolute, decoder)
    }

    /// Set the view orientation; relative updates compose with the
    /// current orientation.
    pub fn set_view_orientation(&mut self, orientation: Orientation, absolute: bool) -> bool {
        let Some(decoder) = &self.decoder else {
            return false;
        };

        self.view.set_view_orientation(orientation, absolute, decoder)
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.close();
    }
}
