//! Sample formats and four-character codes
//!
//! The pipeline supports a small fixed set of audio encodings and video
//! pixel formats; everything else is rewritten to a safe fallback during
//! negotiation (see the callback sink in `reel-player`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-character code identifying a raw sample layout, as exchanged with
/// the decoder during format negotiation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    /// Create from a four-byte literal, e.g. `FourCc::new(b"S16N")`.
    pub const fn new(code: &[u8; 4]) -> Self {
        FourCc(*code)
    }

    /// Case-insensitive comparison, used for video chroma codes.
    pub fn matches_ignore_case(self, code: &[u8; 4]) -> bool {
        self.0.eq_ignore_ascii_case(code)
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc({})", self)
    }
}

/// Supported audio sample encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioSampleFormat {
    /// 8-bit signed integer
    Int8,

    /// 16-bit signed integer (safe default)
    Int16,

    /// 32-bit signed integer
    Int32,

    /// 32-bit float
    Float,

    /// 64-bit float
    Double,
}

impl AudioSampleFormat {
    /// Size of one sample of one channel, in bytes.
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            AudioSampleFormat::Int8 => 1,
            AudioSampleFormat::Int16 => 2,
            AudioSampleFormat::Int32 | AudioSampleFormat::Float => 4,
            AudioSampleFormat::Double => 8,
        }
    }
}

/// Supported video pixel formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoSampleFormat {
    /// Packed AYUV 4:4:4
    Ayuv,

    /// Packed BGRA (fallback for single-plane sources)
    Bgra,

    /// Packed UYVY 4:2:2
    Uyvy,

    /// Packed YUY2 4:2:2 (fallback for multi-plane sources)
    Yuy2,

    /// Packed YVYU 4:2:2
    Yvyu,
}

/// Negotiated audio delivery format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Sample encoding
    pub sample_format: AudioSampleFormat,

    /// Interleaved channel count (capped at 8 during negotiation)
    pub channels: u32,

    /// Frames per second
    pub sample_rate: u32,
}

impl AudioFormat {
    /// Size of one frame (one sample of every channel), in bytes.
    pub fn bytes_per_frame(&self) -> usize {
        self.sample_format.bytes_per_sample() * self.channels as usize
    }
}

/// Negotiated video buffer layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFormat {
    /// Pixel format of the decoder-written buffer
    pub sample_format: VideoSampleFormat,

    /// Buffer width in pixels (may differ from the output width for
    /// force-converted formats)
    pub buffer_width: u32,

    /// Buffer height in pixels
    pub buffer_height: u32,

    /// Output width in pixels
    pub output_width: u32,

    /// Output height in pixels
    pub output_height: u32,

    /// Bytes per pixel row
    pub stride: u32,
}

impl VideoFormat {
    /// Total buffer size in bytes (stride x buffer height).
    pub fn buffer_size(&self) -> usize {
        self.stride as usize * self.buffer_height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_sizes() {
        assert_eq!(AudioSampleFormat::Int8.bytes_per_sample(), 1);
        assert_eq!(AudioSampleFormat::Int16.bytes_per_sample(), 2);
        assert_eq!(AudioSampleFormat::Int32.bytes_per_sample(), 4);
        assert_eq!(AudioSampleFormat::Float.bytes_per_sample(), 4);
        assert_eq!(AudioSampleFormat::Double.bytes_per_sample(), 8);
    }

    #[test]
    fn frame_size_is_channels_times_sample() {
        let format = AudioFormat {
            sample_format: AudioSampleFormat::Int16,
            channels: 6,
            sample_rate: 48_000,
        };
        assert_eq!(format.bytes_per_frame(), 12);
    }

    #[test]
    fn fourcc_matching() {
        let code = FourCc::new(b"YUY2");
        assert!(code.matches_ignore_case(b"yuy2"));
        assert!(!code.matches_ignore_case(b"RV32"));
        assert_eq!(code.to_string(), "YUY2");
    }

    #[test]
    fn video_buffer_size() {
        let format = VideoFormat {
            sample_format: VideoSampleFormat::Bgra,
            buffer_width: 320,
            buffer_height: 240,
            output_width: 320,
            output_height: 240,
            stride: 1280,
        };
        assert_eq!(format.buffer_size(), 1280 * 240);
    }
}
