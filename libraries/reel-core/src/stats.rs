//! Decoder statistics snapshot

use serde::{Deserialize, Serialize};

/// Point-in-time statistics reported by the decoder.
///
/// Purely informational; formatted for humans by the player's stats
/// collaborator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecoderStats {
    /// Decoded video blocks
    pub decoded_video: i32,

    /// Decoded audio blocks
    pub decoded_audio: i32,

    /// Pictures displayed so far
    pub displayed_pictures: i32,

    /// Pictures lost (arrived too late or dropped)
    pub lost_pictures: i32,

    /// Audio buffers played
    pub played_audio_buffers: i32,

    /// Audio buffers lost
    pub lost_audio_buffers: i32,

    /// Input bitrate
    pub input_bitrate: f32,

    /// Bytes read from the input
    pub read_bytes: i32,

    /// Demux bitrate
    pub demux_bitrate: f32,

    /// Bytes consumed by the demuxer
    pub demux_read_bytes: i32,

    /// Corrupted demux packets
    pub demux_corrupted: i32,

    /// Demux discontinuities
    pub demux_discontinuity: i32,

    /// Network send bitrate
    pub send_bitrate: f32,

    /// Bytes sent over the network
    pub sent_bytes: i32,

    /// Packets sent over the network
    pub sent_packets: i32,
}
