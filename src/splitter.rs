use tracing::info;

use crate::formatter::{FileNameFormatter, SanitizedFormatter};
use crate::instruments::Instrument;
use crate::smf::{Format, Header, MidiDocument, Track};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitOptions {
    pub duplicate_first_track: bool,
    pub filter_by_names: bool,
    pub filter_by_instrument: bool,
    pub remove_empty_tracks: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackClass {
    Meaningful,
    Empty,
}

impl TrackClass {
    pub fn of(track: &Track) -> Self {
        if track.is_meaningful() {
            TrackClass::Meaningful
        } else {
            TrackClass::Empty
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackReport {
    pub index: usize,
    pub class: TrackClass,
    pub display_name: String,
    pub instrument: Instrument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    pub file_name: String,
    pub document: MidiDocument,
    pub report: TrackReport,
}

pub struct Splitter<'a, F = SanitizedFormatter> {
    document: &'a MidiDocument,
    options: SplitOptions,
    formatter: F,
}

impl<'a> Splitter<'a> {
    pub fn new(document: &'a MidiDocument, options: SplitOptions) -> Self {
        Self::with_formatter(document, options, SanitizedFormatter::new())
    }
}

impl<'a, F: FileNameFormatter> Splitter<'a, F> {
    pub fn with_formatter(document: &'a MidiDocument, options: SplitOptions, formatter: F) -> Self {
        Self {
            document,
            options,
            formatter,
        }
    }

    pub fn run(&self) -> Vec<OutputUnit> {
        self.document
            .tracks
            .iter()
            .enumerate()
            .filter_map(|(index, track)| self.split_track(index, track))
            .collect()
    }

    fn split_track(&self, index: usize, track: &Track) -> Option<OutputUnit> {
        let class = TrackClass::of(track);
        if self.options.remove_empty_tracks && class == TrackClass::Empty {
            info!("Skipping empty track: Track {}", index + 1);
            return None;
        }

        let display_name = self.display_name(index, track);
        let instrument = self.instrument(track);
        let file_name = self.formatter.file_name(&display_name, &instrument);

        Some(OutputUnit {
            file_name,
            document: self.single_track_document(index, track),
            report: TrackReport {
                index,
                class,
                display_name,
                instrument,
            },
        })
    }

    fn display_name(&self, index: usize, track: &Track) -> String {
        let positional = || format!("Track {}", index + 1);
        if self.options.filter_by_names {
            track.name().unwrap_or_else(positional)
        } else {
            positional()
        }
    }

    fn instrument(&self, track: &Track) -> Instrument {
        if !self.options.filter_by_instrument {
            return Instrument::Absent;
        }
        track
            .first_program()
            .map_or(Instrument::Absent, Instrument::from_program)
    }

    fn single_track_document(&self, index: usize, track: &Track) -> MidiDocument {
        let mut tracks = Vec::with_capacity(2);
        if self.options.duplicate_first_track && index != 0 {
            if let Some(master) = self.document.tracks.first() {
                tracks.push(master.clone());
            }
        }
        tracks.push(track.clone());
        MidiDocument::new(Header::new(Format::Multi, self.document.timing()), tracks)
    }
}

pub fn split(document: &MidiDocument, options: SplitOptions) -> Vec<OutputUnit> {
    Splitter::new(document, options).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi_event::{Event, Message, MetaEvent, TextKind, TrackEvent};
    use crate::smf::Timing;

    fn midi(delta: u32, message: Message) -> TrackEvent {
        TrackEvent::new(delta, Event::Midi { channel: 0, message })
    }

    fn name(text: &str) -> TrackEvent {
        TrackEvent::new(
            0,
            Event::Meta(MetaEvent::Text {
                kind: TextKind::TrackName,
                text: text.as_bytes().to_vec(),
            }),
        )
    }

    fn document(tracks: Vec<Track>) -> MidiDocument {
        MidiDocument::new(Header::new(Format::Multi, Timing::Metrical(240)), tracks)
    }

    fn sample() -> MidiDocument {
        document(vec![
            Track::new(vec![TrackEvent::new(0, Event::Meta(MetaEvent::Tempo(400_000)))]),
            Track::new(vec![
                name("Strings"),
                midi(0, Message::ProgramChange { program: 48 }),
                midi(0, Message::NoteOn { key: 60, velocity: 90 }),
                midi(96, Message::NoteOff { key: 60, velocity: 0 }),
            ]),
            Track::new(vec![name("Silence")]),
        ])
    }

    #[test]
    fn defaults_keep_every_track_with_positional_names() {
        let units = split(&sample(), SplitOptions::default());
        let names: Vec<_> = units.iter().map(|u| u.file_name.as_str()).collect();
        assert_eq!(names, ["Track 1.mid", "Track 2.mid", "Track 3.mid"]);
        assert!(units.iter().all(|u| u.document.tracks.len() == 1));
        assert!(units.iter().all(|u| u.report.instrument == Instrument::Absent));
    }

    #[test]
    fn empty_tracks_are_dropped_without_report() {
        let options = SplitOptions {
            remove_empty_tracks: true,
            ..SplitOptions::default()
        };
        let units = split(&sample(), options);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].report.index, 1);
        assert_eq!(units[0].report.class, TrackClass::Meaningful);
    }

    #[test]
    fn names_and_instruments_come_from_track_metadata() {
        let options = SplitOptions {
            filter_by_names: true,
            filter_by_instrument: true,
            ..SplitOptions::default()
        };
        let units = split(&sample(), options);
        let names: Vec<_> = units.iter().map(|u| u.file_name.as_str()).collect();
        assert_eq!(names, ["Track 1.mid", "Strings_String Ensemble 1.mid", "Silence.mid"]);
        assert_eq!(units[2].report.class, TrackClass::Empty);
    }

    #[test]
    fn instrument_without_names_uses_position() {
        let options = SplitOptions {
            filter_by_instrument: true,
            ..SplitOptions::default()
        };
        let units = split(&sample(), options);
        assert_eq!(units[1].file_name, "Track 2_String Ensemble 1.mid");
    }

    #[test]
    fn master_track_is_copied_in_front_of_later_tracks() {
        let source = sample();
        let options = SplitOptions {
            duplicate_first_track: true,
            ..SplitOptions::default()
        };
        let units = split(&source, options);
        assert_eq!(units[0].document.tracks, vec![source.tracks[0].clone()]);
        for (unit, index) in units[1..].iter().zip(1..) {
            assert_eq!(
                unit.document.tracks,
                vec![source.tracks[0].clone(), source.tracks[index].clone()]
            );
        }
    }

    #[test]
    fn timing_is_preserved() {
        let mut source = sample();
        source.header = Header::new(
            Format::Sequential,
            Timing::Timecode {
                fps: 25,
                ticks_per_frame: 40,
            },
        );
        for unit in split(&source, SplitOptions::default()) {
            assert_eq!(unit.document.timing(), source.timing());
            assert_eq!(unit.document.header.format, Format::Multi);
        }
    }
}
