//! Track enumeration and selection
//!
//! The decoder reports elementary streams by numeric id; the player
//! presents them as per-kind indexed lists with stable display names.
//! `TrackSet` is rebuilt at open and again whenever the media is
//! (re)parsed.

use reel_core::{Decoder, TrackKind};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::debug;

/// One selectable stream, indexed per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Decoder-assigned id, used for selection round trips.
    pub id: i32,

    /// Human-readable name; synthesized when the container has none.
    pub display_name: String,
}

/// Per-kind track lists for the current media.
#[derive(Debug, Clone, Default)]
pub struct TrackSet {
    audio: Vec<Track>,
    captions: Vec<Track>,
    video: Vec<Track>,
}

impl TrackSet {
    /// Rebuild the lists from the decoder's current descriptions.
    ///
    /// Placeholder entries (id -1, the disabled pseudo track) are
    /// skipped; unnamed tracks get a "{Kind} Track {index}" name.
    pub fn initialize(&mut self, decoder: &Arc<dyn Decoder>) {
        for kind in TrackKind::ALL {
            let tracks = self.tracks_mut(kind);
            tracks.clear();

            for description in decoder.track_descriptions(kind) {
                if description.id == -1 {
                    continue;
                }

                let display_name = if description.name.is_empty() {
                    format!("{} Track {}", kind, tracks.len() + 1)
                } else {
                    description.name
                };

                tracks.push(Track {
                    id: description.id,
                    display_name,
                });
            }

            debug!(kind = %kind, count = self.tracks(kind).len(), "tracks enumerated");
        }
    }

    /// Forget all tracks (media closed).
    pub fn reset(&mut self) {
        self.audio.clear();
        self.captions.clear();
        self.video.clear();
    }

    /// The tracks of `kind`, in enumeration order.
    pub fn tracks(&self, kind: TrackKind) -> &[Track] {
        match kind {
            TrackKind::Audio => &self.audio,
            TrackKind::Caption => &self.captions,
            TrackKind::Video => &self.video,
        }
    }

    fn tracks_mut(&mut self, kind: TrackKind) -> &mut Vec<Track> {
        match kind {
            TrackKind::Audio => &mut self.audio,
            TrackKind::Caption => &mut self.captions,
            TrackKind::Video => &mut self.video,
        }
    }

    /// Index of the decoder's currently selected track of `kind`, or
    /// `None` when nothing (or an unknown id) is selected.
    pub fn selected_track(&self, kind: TrackKind, decoder: &Arc<dyn Decoder>) -> Option<usize> {
        let id = decoder.selected_track(kind)?;
        self.tracks(kind).iter().position(|track| track.id == id)
    }

    /// Select the track of `kind` at `index`, or deselect with -1.
    ///
    /// Selection is exclusive per kind only; the other kinds keep their
    /// selection.
    pub fn select_track(&self, kind: TrackKind, index: i32, decoder: &Arc<dyn Decoder>) -> bool {
        if index == -1 {
            return decoder.select_track(kind, None);
        }

        let Ok(index) = usize::try_from(index) else {
            return false;
        };

        match self.tracks(kind).get(index) {
            Some(track) => decoder.select_track(kind, Some(track.id)),
            None => false,
        }
    }

    /// One line per track, for the media info summary.
    pub fn write_summary(&self, out: &mut String) {
        for kind in TrackKind::ALL {
            for track in self.tracks(kind) {
                let _ = writeln!(out, "{} Track: {}", kind, track.display_name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::{
        AudioCallbacks, ClockTime, NativeEventSink, NativeState, Result, TrackDescription,
        VideoCallbacks,
    };
    use std::sync::Mutex;

    struct TrackDecoder {
        descriptions: Vec<TrackDescription>,
        selected: Mutex<Option<i32>>,
    }

    impl TrackDecoder {
        fn new(descriptions: Vec<TrackDescription>) -> Arc<dyn Decoder> {
            Arc::new(TrackDecoder {
                descriptions,
                selected: Mutex::new(None),
            })
        }
    }

    impl Decoder for TrackDecoder {
        fn native_state(&self) -> NativeState {
            NativeState::Stopped
        }
        fn rate(&self) -> f32 {
            0.0
        }
        fn set_rate(&self, _rate: f32) -> bool {
            true
        }
        fn play(&self) -> bool {
            true
        }
        fn pause(&self) {}
        fn stop(&self) {}
        fn can_pause(&self) -> bool {
            true
        }
        fn is_seekable(&self) -> bool {
            true
        }
        fn set_time(&self, _time: ClockTime) {}
        fn duration(&self) -> ClockTime {
            ClockTime::ZERO
        }
        fn attach_event_sink(&self, _sink: Arc<dyn NativeEventSink>) -> Result<()> {
            Ok(())
        }
        fn detach_event_sink(&self) {}
        fn set_audio_callbacks(&self, _callbacks: Option<Arc<dyn AudioCallbacks>>) {}
        fn set_video_callbacks(&self, _callbacks: Option<Arc<dyn VideoCallbacks>>) {}

        fn track_descriptions(&self, kind: TrackKind) -> Vec<TrackDescription> {
            if kind == TrackKind::Audio {
                self.descriptions.clone()
            } else {
                Vec::new()
            }
        }

        fn selected_track(&self, kind: TrackKind) -> Option<i32> {
            if kind == TrackKind::Audio {
                *self.selected.lock().unwrap()
            } else {
                None
            }
        }

        fn select_track(&self, kind: TrackKind, id: Option<i32>) -> bool {
            if kind != TrackKind::Audio {
                return false;
            }
            *self.selected.lock().unwrap() = id;
            true
        }
    }

    fn descriptions() -> Vec<TrackDescription> {
        vec![
            TrackDescription {
                id: -1,
                name: "Disable".into(),
            },
            TrackDescription {
                id: 3,
                name: "Commentary".into(),
            },
            TrackDescription {
                id: 7,
                name: String::new(),
            },
        ]
    }

    #[test]
    fn placeholder_entries_are_skipped() {
        let decoder = TrackDecoder::new(descriptions());
        let mut tracks = TrackSet::default();
        tracks.initialize(&decoder);

        let audio = tracks.tracks(TrackKind::Audio);
        assert_eq!(audio.len(), 2);
        assert_eq!(audio[0].id, 3);
        assert_eq!(audio[1].id, 7);
    }

    #[test]
    fn unnamed_tracks_get_a_synthesized_name() {
        let decoder = TrackDecoder::new(descriptions());
        let mut tracks = TrackSet::default();
        tracks.initialize(&decoder);

        let audio = tracks.tracks(TrackKind::Audio);
        assert_eq!(audio[0].display_name, "Commentary");
        assert_eq!(audio[1].display_name, "Audio Track 2");
    }

    #[test]
    fn selection_round_trips_through_indices() {
        let decoder = TrackDecoder::new(descriptions());
        let mut tracks = TrackSet::default();
        tracks.initialize(&decoder);

        assert!(tracks.select_track(TrackKind::Audio, 1, &decoder));
        assert_eq!(tracks.selected_track(TrackKind::Audio, &decoder), Some(1));

        assert!(tracks.select_track(TrackKind::Audio, -1, &decoder));
        assert_eq!(tracks.selected_track(TrackKind::Audio, &decoder), None);
    }

    #[test]
    fn out_of_range_selection_is_refused() {
        let decoder = TrackDecoder::new(descriptions());
        let mut tracks = TrackSet::default();
        tracks.initialize(&decoder);

        assert!(!tracks.select_track(TrackKind::Audio, 5, &decoder));
        assert!(!tracks.select_track(TrackKind::Audio, -2, &decoder));
        assert!(!tracks.select_track(TrackKind::Caption, 0, &decoder));
    }

    #[test]
    fn summary_lists_every_track() {
        let decoder = TrackDecoder::new(descriptions());
        let mut tracks = TrackSet::default();
        tracks.initialize(&decoder);

        let mut summary = String::new();
        tracks.write_summary(&mut summary);
        assert_eq!(summary, "Audio Track: Commentary\nAudio Track: Audio Track 2\n");
    }
}
