//! Shared test doubles for the player integration tests.

use reel_core::{
    AudioCallbacks, ByteStream, ClockTime, Decoder, DecoderError, DecoderFactory, DecoderStats,
    NativeEvent, NativeEventSink, NativeState, TrackDescription, TrackKind, VideoCallbacks,
    Viewpoint,
};
use reel_player::EventSink;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scriptable in-memory decoder.
///
/// State transitions mimic a cooperative native engine: `play` reports
/// Playing, `pause` Paused, `stop` Stopped. Tests drive event delivery
/// through `emit` and inspect recorded calls afterwards.
pub struct FakeDecoder {
    pub state: Mutex<NativeState>,
    pub rate: Mutex<f32>,
    pub duration: ClockTime,
    pub can_pause: bool,
    pub seekable: bool,
    pub video_size: Mutex<Option<(u32, u32)>>,
    pub stats: Option<DecoderStats>,
    pub audio_tracks: Mutex<Vec<TrackDescription>>,
    pub selected_audio: Mutex<Option<i32>>,

    pub refuse_rate: bool,
    pub refuse_play: bool,
    pub refuse_attach: bool,

    pub event_sink: Mutex<Option<Arc<dyn NativeEventSink>>>,
    pub audio_callbacks: Mutex<Option<Arc<dyn AudioCallbacks>>>,
    pub video_callbacks: Mutex<Option<Arc<dyn VideoCallbacks>>>,

    pub seeks: Mutex<Vec<ClockTime>>,
    pub viewpoints: Mutex<Vec<Viewpoint>>,
    pub play_calls: AtomicUsize,
    pub stop_calls: AtomicUsize,
    pub pause_calls: AtomicUsize,
}

impl FakeDecoder {
    pub fn new() -> FakeDecoder {
        FakeDecoder {
            state: Mutex::new(NativeState::Stopped),
            rate: Mutex::new(0.0),
            duration: ClockTime::from_secs(10),
            can_pause: true,
            seekable: true,
            video_size: Mutex::new(None),
            stats: None,
            audio_tracks: Mutex::new(Vec::new()),
            selected_audio: Mutex::new(None),
            refuse_rate: false,
            refuse_play: false,
            refuse_attach: false,
            event_sink: Mutex::new(None),
            audio_callbacks: Mutex::new(None),
            video_callbacks: Mutex::new(None),
            seeks: Mutex::new(Vec::new()),
            viewpoints: Mutex::new(Vec::new()),
            play_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            pause_calls: AtomicUsize::new(0),
        }
    }

    pub fn shared() -> Arc<FakeDecoder> {
        Arc::new(FakeDecoder::new())
    }

    /// Push a native event as a decoder worker thread would.
    pub fn emit(&self, event: NativeEvent) {
        if let Some(sink) = self.event_sink.lock().unwrap().clone() {
            sink.notify(event);
        }
    }

    pub fn set_state(&self, state: NativeState) {
        *self.state.lock().unwrap() = state;
    }

    pub fn audio_sink(&self) -> Arc<dyn AudioCallbacks> {
        self.audio_callbacks.lock().unwrap().clone().unwrap()
    }

    pub fn video_sink(&self) -> Arc<dyn VideoCallbacks> {
        self.video_callbacks.lock().unwrap().clone().unwrap()
    }
}

impl Default for FakeDecoder {
    fn default() -> Self {
        FakeDecoder::new()
    }
}

impl Decoder for FakeDecoder {
    fn native_state(&self) -> NativeState {
        *self.state.lock().unwrap()
    }

    fn rate(&self) -> f32 {
        *self.rate.lock().unwrap()
    }

    fn set_rate(&self, rate: f32) -> bool {
        if self.refuse_rate {
            return false;
        }
        *self.rate.lock().unwrap() = rate;
        true
    }

    fn play(&self) -> bool {
        self.play_calls.fetch_add(1, Ordering::SeqCst);
        if self.refuse_play {
            return false;
        }
        self.set_state(NativeState::Playing);
        true
    }

    fn pause(&self) {
        self.pause_calls.fetch_add(1, Ordering::SeqCst);
        self.set_state(NativeState::Paused);
    }

    fn stop(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.set_state(NativeState::Stopped);
    }

    fn can_pause(&self) -> bool {
        self.can_pause
    }

    fn is_seekable(&self) -> bool {
        self.seekable
    }

    fn set_time(&self, time: ClockTime) {
        self.seeks.lock().unwrap().push(time);
    }

    fn duration(&self) -> ClockTime {
        self.duration
    }

    fn stats(&self) -> Option<DecoderStats> {
        self.stats
    }

    fn video_size(&self) -> Option<(u32, u32)> {
        *self.video_size.lock().unwrap()
    }

    fn attach_event_sink(&self, sink: Arc<dyn NativeEventSink>) -> reel_core::Result<()> {
        if self.refuse_attach {
            return Err(DecoderError::AttachFailed("event manager unavailable".into()));
        }
        *self.event_sink.lock().unwrap() = Some(sink);
        Ok(())
    }

    fn detach_event_sink(&self) {
        *self.event_sink.lock().unwrap() = None;
    }

    fn set_audio_callbacks(&self, callbacks: Option<Arc<dyn AudioCallbacks>>) {
        *self.audio_callbacks.lock().unwrap() = callbacks;
    }

    fn set_video_callbacks(&self, callbacks: Option<Arc<dyn VideoCallbacks>>) {
        *self.video_callbacks.lock().unwrap() = callbacks;
    }

    fn track_descriptions(&self, kind: TrackKind) -> Vec<TrackDescription> {
        if kind == TrackKind::Audio {
            self.audio_tracks.lock().unwrap().clone()
        } else {
            Vec::new()
        }
    }

    fn selected_track(&self, kind: TrackKind) -> Option<i32> {
        if kind == TrackKind::Audio {
            *self.selected_audio.lock().unwrap()
        } else {
            None
        }
    }

    fn select_track(&self, kind: TrackKind, id: Option<i32>) -> bool {
        if kind != TrackKind::Audio {
            return false;
        }
        *self.selected_audio.lock().unwrap() = id;
        true
    }

    fn set_viewpoint(&self, viewpoint: Viewpoint) -> bool {
        self.viewpoints.lock().unwrap().push(viewpoint);
        true
    }
}

/// Factory handing out one prepared `FakeDecoder`.
pub struct FakeFactory {
    pub decoder: Arc<FakeDecoder>,
    pub fail: bool,
    pub locators: Mutex<Vec<String>>,
    pub streams: Mutex<Vec<ByteStream>>,
}

impl FakeFactory {
    pub fn new(decoder: Arc<FakeDecoder>) -> Arc<FakeFactory> {
        Arc::new(FakeFactory {
            decoder,
            fail: false,
            locators: Mutex::new(Vec::new()),
            streams: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(decoder: Arc<FakeDecoder>) -> Arc<FakeFactory> {
        Arc::new(FakeFactory {
            decoder,
            fail: true,
            locators: Mutex::new(Vec::new()),
            streams: Mutex::new(Vec::new()),
        })
    }
}

impl DecoderFactory for FakeFactory {
    fn from_location(&self, locator: &str) -> reel_core::Result<Arc<dyn Decoder>> {
        if self.fail {
            return Err(DecoderError::CreationFailed("no engine".into()));
        }
        self.locators.lock().unwrap().push(locator.to_string());
        Ok(self.decoder.clone())
    }

    fn from_byte_stream(&self, stream: ByteStream) -> reel_core::Result<Arc<dyn Decoder>> {
        if self.fail {
            return Err(DecoderError::CreationFailed("no engine".into()));
        }
        self.streams.lock().unwrap().push(stream);
        Ok(self.decoder.clone())
    }
}

/// Event sink recording everything it receives.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<reel_core::MediaEvent>>,
}

impl CollectingSink {
    pub fn new() -> Arc<CollectingSink> {
        Arc::new(CollectingSink::default())
    }

    /// Take and clear the recorded events.
    pub fn take(&self) -> Vec<reel_core::MediaEvent> {
        std::mem::take(&mut self.events.lock().unwrap())
    }
}

impl EventSink for CollectingSink {
    fn receive(&self, event: reel_core::MediaEvent) {
        self.events.lock().unwrap().push(event);
    }
}
