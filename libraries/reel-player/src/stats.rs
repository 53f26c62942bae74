//! Human-readable statistics formatting

use reel_core::DecoderStats;
use std::fmt::Write as _;

/// Render a statistics snapshot as indented sections.
///
/// The no-media and stats-unavailable cases are handled by the player
/// before this is called.
pub fn format_decoder_stats(stats: &DecoderStats) -> String {
    let mut out = String::new();

    out.push_str("General\n");
    let _ = writeln!(out, "    Decoded Video: {}", stats.decoded_video);
    let _ = writeln!(out, "    Decoded Audio: {}", stats.decoded_audio);
    let _ = writeln!(out, "    Displayed Pictures: {}", stats.displayed_pictures);
    let _ = writeln!(out, "    Lost Pictures: {}", stats.lost_pictures);
    let _ = writeln!(out, "    Played A-Buffers: {}", stats.played_audio_buffers);
    let _ = writeln!(out, "    Lost A-Buffers: {}", stats.lost_audio_buffers);
    out.push('\n');

    out.push_str("Input\n");
    let _ = writeln!(out, "    Bit Rate: {}", stats.input_bitrate);
    let _ = writeln!(out, "    Bytes Read: {}", stats.read_bytes);
    out.push('\n');

    out.push_str("Demux\n");
    let _ = writeln!(out, "    Bit Rate: {}", stats.demux_bitrate);
    let _ = writeln!(out, "    Bytes Read: {}", stats.demux_read_bytes);
    let _ = writeln!(out, "    Corrupted: {}", stats.demux_corrupted);
    let _ = writeln!(out, "    Discontinuity: {}", stats.demux_discontinuity);
    out.push('\n');

    out.push_str("Network\n");
    let _ = writeln!(out, "    Bit Rate: {}", stats.send_bitrate);
    let _ = writeln!(out, "    Sent Bytes: {}", stats.sent_bytes);
    let _ = writeln!(out, "    Sent Packets: {}", stats.sent_packets);
    out.push('\n');

    out
}
