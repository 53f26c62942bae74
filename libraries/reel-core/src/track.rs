//! Track identification types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of elementary stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    /// Audio stream
    Audio,

    /// Caption / subtitle stream
    Caption,

    /// Video stream
    Video,
}

impl TrackKind {
    /// All track kinds, in enumeration order.
    pub const ALL: [TrackKind; 3] = [TrackKind::Audio, TrackKind::Caption, TrackKind::Video];
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Audio => write!(f, "Audio"),
            TrackKind::Caption => write!(f, "Caption"),
            TrackKind::Video => write!(f, "Video"),
        }
    }
}

/// One elementary stream as reported by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescription {
    /// Decoder-assigned numeric id; -1 marks a placeholder entry
    pub id: i32,

    /// Stream name from the container, possibly empty
    pub name: String,
}
