//! Decoded, timestamped samples
//!
//! Samples are produced exclusively by the sample pipeline and handed to
//! the consumer by shared ownership (`Arc`), so pooled storage is reclaimed
//! once every holder has released it. A sample is immutable once sealed
//! into an `Arc`; a consumer may legitimately retain one past a tick
//! boundary or even past player close.

use crate::format::{AudioFormat, VideoFormat};
use crate::pool::{PoolLease, SampleBuffer};
use crate::time::ClockTime;
use std::time::Duration;

/// A single decoded audio buffer ready for presentation.
pub struct AudioSample {
    lease: PoolLease<SampleBuffer>,
    format: AudioFormat,
    frames: u32,
    time: ClockTime,
    duration: Duration,
}

impl AudioSample {
    /// Copy `data` into pooled storage and seal the descriptor.
    ///
    /// Returns `None` on allocation failure or when `data` is shorter than
    /// `frames` requires - the caller drops the sample silently in that
    /// case, never surfacing a hard error into the decoder thread.
    pub fn initialize(
        mut lease: PoolLease<SampleBuffer>,
        data: &[u8],
        frames: u32,
        format: AudioFormat,
        time: ClockTime,
        duration: Duration,
    ) -> Option<AudioSample> {
        let required = frames as usize * format.bytes_per_frame();

        if required == 0 || data.len() < required {
            return None;
        }

        if !lease.storage_mut().ensure_size(required) {
            return None;
        }

        lease
            .storage_mut()
            .as_mut_slice()
            .copy_from_slice(&data[..required]);

        Some(AudioSample {
            lease,
            format,
            frames,
            time,
            duration,
        })
    }

    /// Raw interleaved sample data.
    pub fn data(&self) -> &[u8] {
        self.lease.storage().as_slice()
    }

    /// Delivery format of the data.
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Number of frames in the buffer.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Presentation time in the player's clock.
    pub fn time(&self) -> ClockTime {
        self.time
    }

    /// Duration for which the sample is valid.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// A single decoded video frame ready for presentation.
pub struct VideoSample {
    lease: PoolLease<SampleBuffer>,
    format: VideoFormat,
    time: ClockTime,
    duration: Duration,
}

impl VideoSample {
    /// Size pooled storage for one frame of `format`.
    ///
    /// Returns `None` when the layout describes an empty buffer or the
    /// allocation fails; the caller falls back to a scratch buffer because
    /// the decoder requires a valid write target either way.
    pub fn initialize(
        mut lease: PoolLease<SampleBuffer>,
        format: VideoFormat,
        duration: Duration,
    ) -> Option<VideoSample> {
        if !lease.storage_mut().ensure_size(format.buffer_size()) {
            return None;
        }

        Some(VideoSample {
            lease,
            format,
            time: ClockTime::ZERO,
            duration,
        })
    }

    /// Raw frame data.
    pub fn data(&self) -> &[u8] {
        self.lease.storage().as_slice()
    }

    /// Writable frame data; only reachable before the sample is sealed
    /// into an `Arc`.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.lease.storage_mut().as_mut_slice()
    }

    /// Buffer layout of the frame.
    pub fn format(&self) -> VideoFormat {
        self.format
    }

    /// Stamp the presentation time (in the player's clock).
    pub fn set_time(&mut self, time: ClockTime) {
        self.time = time;
    }

    /// Presentation time in the player's clock.
    pub fn time(&self) -> ClockTime {
        self.time
    }

    /// Duration for which the sample is valid.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

enum FrameTarget {
    /// A pooled sample that will be sealed and enqueued at display time.
    Pooled(VideoSample),

    /// Throwaway storage: the decoder requires a valid buffer even for
    /// frames the pipeline will not keep.
    Scratch(Vec<u8>),
}

/// One-frame write handle created by the video lock callback and consumed
/// by the display callback.
///
/// A scratch lock dropped without display frees itself.
pub struct FrameLock {
    target: FrameTarget,
}

impl FrameLock {
    /// Wrap a pooled sample for the decoder to write into.
    pub fn pooled(sample: VideoSample) -> Self {
        FrameLock {
            target: FrameTarget::Pooled(sample),
        }
    }

    /// Allocate a throwaway buffer of `size` bytes.
    pub fn scratch(size: usize) -> Self {
        FrameLock {
            target: FrameTarget::Scratch(vec![0; size]),
        }
    }

    /// Writable plane storage for the decoder.
    pub fn plane_mut(&mut self) -> &mut [u8] {
        match &mut self.target {
            FrameTarget::Pooled(sample) => sample.data_mut(),
            FrameTarget::Scratch(buffer) => buffer.as_mut_slice(),
        }
    }

    /// True when this lock carries no sample.
    pub fn is_scratch(&self) -> bool {
        matches!(self.target, FrameTarget::Scratch(_))
    }

    /// Recover the pooled sample; `None` for scratch locks.
    pub fn into_sample(self) -> Option<VideoSample> {
        match self.target {
            FrameTarget::Pooled(sample) => Some(sample),
            FrameTarget::Scratch(_) => None,
        }
    }
}
