//! Sample pipeline
//!
//! `CallbackSink` is the capability object registered with the decoder for
//! one session. Decoder worker threads call into it to negotiate formats
//! and deliver raw frame buffers; it stamps samples with the player clock,
//! copies them into pooled storage, and queues them for the consumer.
//!
//! Every entry point is non-blocking and tolerates a detached sink (a
//! delivery racing a concurrent close must no-op safely). Pipeline
//! failures degrade - a dropped audio sample or a scratch video buffer -
//! and never surface as errors, because the decoder requires a valid
//! buffer even on failure paths.

use crossbeam_channel::Sender;
use reel_core::{
    AudioCallbacks, AudioFormat, AudioSample, AudioSampleFormat, AudioSetupRequest, ClockTime,
    Decoder, FourCc, FrameLock, SampleBuffer, SamplePool, VideoCallbacks, VideoFormat,
    VideoPlaneLayout, VideoSample, VideoSampleFormat, VideoSetupRequest,
};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::{Duration, Instant};
use tracing::trace;

struct AudioState {
    format: AudioFormat,
}

impl Default for AudioState {
    fn default() -> Self {
        AudioState {
            format: AudioFormat {
                sample_format: AudioSampleFormat::Int16,
                channels: 0,
                sample_rate: 0,
            },
        }
    }
}

struct VideoState {
    format: Option<VideoFormat>,

    /// Clock time of the last locked frame; `ClockTime::MIN` before the
    /// first frame of a session.
    previous_time: ClockTime,
}

impl Default for VideoState {
    fn default() -> Self {
        VideoState {
            format: None,
            previous_time: ClockTime::MIN,
        }
    }
}

/// Decoder-facing sample sink for one playback session.
pub struct CallbackSink {
    attached: AtomicBool,
    decoder: Mutex<Option<Weak<dyn Decoder>>>,

    /// Player clock, pushed once per tick, in microseconds.
    current_time: AtomicI64,

    /// Reference point for decoder-side timestamps.
    epoch: Instant,

    audio: Mutex<AudioState>,
    video: Mutex<VideoState>,

    audio_pool: SamplePool<SampleBuffer>,
    video_pool: SamplePool<SampleBuffer>,

    audio_tx: Sender<Arc<AudioSample>>,
    video_tx: Sender<Arc<VideoSample>>,

    max_audio_channels: u32,
    video_frame_duration: Duration,
}

impl CallbackSink {
    /// Create a sink feeding the given sample queues.
    pub fn new(
        audio_tx: Sender<Arc<AudioSample>>,
        video_tx: Sender<Arc<VideoSample>>,
        max_audio_channels: u32,
        video_frame_duration: Duration,
    ) -> Self {
        CallbackSink {
            attached: AtomicBool::new(false),
            decoder: Mutex::new(None),
            current_time: AtomicI64::new(0),
            epoch: Instant::now(),
            audio: Mutex::new(AudioState::default()),
            video: Mutex::new(VideoState::default()),
            audio_pool: SamplePool::new(),
            video_pool: SamplePool::new(),
            audio_tx,
            video_tx,
            max_audio_channels,
            video_frame_duration,
        }
    }

    /// Register the sink with a decoder, shutting down any previous
    /// registration first. Called at open time and again whenever the
    /// media is (re)parsed.
    pub fn initialize(sink: &Arc<CallbackSink>, decoder: &Arc<dyn Decoder>) {
        sink.shutdown();

        *sink.decoder.lock().unwrap() = Some(Arc::downgrade(decoder));
        sink.attached.store(true, Ordering::SeqCst);

        decoder.set_audio_callbacks(Some(sink.clone() as Arc<dyn AudioCallbacks>));
        decoder.set_video_callbacks(Some(sink.clone() as Arc<dyn VideoCallbacks>));
    }

    /// Detach from the decoder and reclaim pooled storage.
    ///
    /// In-flight decoder callbacks racing this call observe the cleared
    /// attached flag and no-op.
    pub fn shutdown(&self) {
        let decoder = self
            .decoder
            .lock()
            .unwrap()
            .take()
            .and_then(|weak| weak.upgrade());

        if let Some(decoder) = decoder {
            decoder.set_audio_callbacks(None);
            decoder.set_video_callbacks(None);
        }

        self.attached.store(false, Ordering::SeqCst);

        self.audio_pool.reset();
        self.video_pool.reset();

        self.current_time.store(0, Ordering::SeqCst);
        *self.audio.lock().unwrap() = AudioState::default();
        *self.video.lock().unwrap() = VideoState::default();
    }

    /// Push the player clock for sample timestamping.
    pub fn set_current_time(&self, time: ClockTime) {
        self.current_time.store(time.as_micros(), Ordering::SeqCst);
    }

    /// The most recently pushed player clock.
    pub fn current_time(&self) -> ClockTime {
        ClockTime::from_micros(self.current_time.load(Ordering::SeqCst))
    }

    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// Microseconds elapsed on the sink's reference clock.
    fn reference_micros(&self) -> i64 {
        self.epoch.elapsed().as_micros() as i64
    }

    fn output_size(&self) -> Option<(u32, u32)> {
        let decoder = self.decoder.lock().unwrap().clone()?.upgrade()?;
        decoder.video_size()
    }
}

/// Round up to the next multiple of 16.
fn align16(value: u32) -> u32 {
    value.div_ceil(16) * 16
}

const CODEC_S8: FourCc = FourCc::new(b"S8  ");
const CODEC_S16N: FourCc = FourCc::new(b"S16N");
const CODEC_S32N: FourCc = FourCc::new(b"S32N");
const CODEC_FL32: FourCc = FourCc::new(b"FL32");
const CODEC_FL64: FourCc = FourCc::new(b"FL64");
const CODEC_U8: FourCc = FourCc::new(b"U8  ");

const CHROMA_YUY2: FourCc = FourCc::new(b"YUY2");
const CHROMA_RV32: FourCc = FourCc::new(b"RV32");

impl AudioCallbacks for CallbackSink {
    fn audio_setup(&self, request: &mut AudioSetupRequest) -> bool {
        if !self.is_attached() {
            return false;
        }

        trace!(
            codec = %request.codec,
            rate = request.sample_rate,
            channels = request.channels,
            "audio setup"
        );

        if request.channels > self.max_audio_channels {
            request.channels = self.max_audio_channels;
        }

        let sample_format = if request.codec == CODEC_S8 {
            AudioSampleFormat::Int8
        } else if request.codec == CODEC_S16N {
            AudioSampleFormat::Int16
        } else if request.codec == CODEC_S32N {
            AudioSampleFormat::Int32
        } else if request.codec == CODEC_FL32 {
            AudioSampleFormat::Float
        } else if request.codec == CODEC_FL64 {
            AudioSampleFormat::Double
        } else if request.codec == CODEC_U8 {
            // unsigned integer fall back
            request.codec = CODEC_S8;
            AudioSampleFormat::Int8
        } else {
            // unsupported format fall back
            request.codec = CODEC_S16N;
            AudioSampleFormat::Int16
        };

        self.audio.lock().unwrap().format = AudioFormat {
            sample_format,
            channels: request.channels,
            sample_rate: request.sample_rate,
        };

        true
    }

    fn audio_cleanup(&self) {
        trace!("audio cleanup");
    }

    fn audio_play(&self, samples: &[u8], frames: u32, timestamp: i64) {
        if !self.is_attached() {
            return;
        }

        let format = self.audio.lock().unwrap().format;

        if frames == 0 || format.sample_rate == 0 || format.channels == 0 {
            return;
        }

        trace!(frames, timestamp, "audio play");

        let delay = timestamp - self.reference_micros();
        let time = self.current_time().offset_micros(delay);
        let duration = Duration::from_micros(
            u64::from(frames) * 1_000_000 / u64::from(format.sample_rate),
        );

        let lease = self.audio_pool.acquire();

        // dropped silently when the pool cannot back the sample
        if let Some(sample) = AudioSample::initialize(lease, samples, frames, format, time, duration)
        {
            self.audio_tx.send(Arc::new(sample)).ok();
        }
    }

    fn audio_pause(&self, timestamp: i64) {
        // pausing is handled at tick time
        trace!(timestamp, "audio pause");
    }

    fn audio_resume(&self, timestamp: i64) {
        // resuming is handled at tick time
        trace!(timestamp, "audio resume");
    }

    fn audio_flush(&self, timestamp: i64) {
        trace!(timestamp, "audio flush");
    }

    fn audio_drain(&self) {
        trace!("audio drain");
    }
}

impl VideoCallbacks for CallbackSink {
    fn video_setup(&self, request: &mut VideoSetupRequest) -> Option<VideoPlaneLayout> {
        if !self.is_attached() {
            return None;
        }

        trace!(
            chroma = %request.chroma,
            width = request.width,
            height = request.height,
            "video setup"
        );

        let mut video = self.video.lock().unwrap();

        let Some((output_width, output_height)) = self.output_size() else {
            video.format = None;
            return None;
        };

        if output_width == 0 || output_height == 0 {
            video.format = None;
            return None;
        }

        let mut buffer_width = request.width;
        let mut buffer_height = request.height;

        let (sample_format, stride) = if request.chroma.matches_ignore_case(b"AYUV") {
            (VideoSampleFormat::Ayuv, request.width * 4)
        } else if request.chroma.matches_ignore_case(b"RV32") {
            (VideoSampleFormat::Bgra, request.width * 4)
        } else if request.chroma.matches_ignore_case(b"UYVY")
            || request.chroma.matches_ignore_case(b"Y422")
            || request.chroma.matches_ignore_case(b"UYNV")
            || request.chroma.matches_ignore_case(b"HDYC")
        {
            (VideoSampleFormat::Uyvy, request.width * 2)
        } else if request.chroma.matches_ignore_case(b"YUY2")
            || request.chroma.matches_ignore_case(b"V422")
            || request.chroma.matches_ignore_case(b"YUYV")
        {
            (VideoSampleFormat::Yuy2, request.width * 2)
        } else if request.chroma.matches_ignore_case(b"YVYU") {
            (VideoSampleFormat::Yvyu, request.width * 2)
        } else {
            // reconfigure the decoder output to a natively supported format
            if request.plane_count == 0 {
                video.format = None;
                return None;
            }

            if request.plane_count > 1 {
                request.chroma = CHROMA_YUY2;

                buffer_width = align16(output_width) / 2;
                buffer_height = align16(output_height);
                request.height = buffer_height;

                (VideoSampleFormat::Yuy2, buffer_width * 4)
            } else {
                request.chroma = CHROMA_RV32;

                buffer_width = output_width;
                buffer_height = output_height;

                (VideoSampleFormat::Bgra, buffer_width * 4)
            }
        };

        video.format = Some(VideoFormat {
            sample_format,
            buffer_width,
            buffer_height,
            output_width,
            output_height,
            stride,
        });

        Some(VideoPlaneLayout {
            pitch: stride,
            lines: buffer_height,
        })
    }

    fn video_cleanup(&self) {
        trace!("video cleanup");
    }

    fn video_lock(&self) -> FrameLock {
        let mut video = self.video.lock().unwrap();
        let now = self.current_time();

        let Some(format) = video.format else {
            // nothing negotiated; the decoder still requires a buffer
            return FrameLock::scratch(0);
        };

        let scratch_size = format.buffer_size();

        if !self.is_attached() {
            return FrameLock::scratch(scratch_size);
        }

        // skip frames the clock has already seen; the decoder still
        // requires a valid buffer or it will fault
        if video.previous_time == now {
            return FrameLock::scratch(scratch_size);
        }

        trace!(time = %now, "video lock");

        let lease = self.video_pool.acquire();

        match VideoSample::initialize(lease, format, self.video_frame_duration) {
            Some(sample) => {
                video.previous_time = now;
                FrameLock::pooled(sample)
            }
            None => FrameLock::scratch(scratch_size),
        }
    }

    fn video_display(&self, frame: FrameLock) {
        // a scratch lock is discarded here
        let Some(mut sample) = frame.into_sample() else {
            return;
        };

        if !self.is_attached() {
            return;
        }

        let time = self.current_time();
        trace!(time = %time, "video display");

        sample.set_time(time);
        self.video_tx.send(Arc::new(sample)).ok();
    }
}
