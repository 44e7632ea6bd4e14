mod decoder;
mod encoder;
mod error;
mod vlq;

pub use decoder::decode;
pub use encoder::encode;
pub use error::{DecodeError, EncodeError};

use crate::midi_event::{latin1_to_string, Event, Message, MetaEvent, TextKind, TrackEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Single,
    Multi,
    Sequential,
}

impl Format {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Format::Single),
            1 => Some(Format::Multi),
            2 => Some(Format::Sequential),
            _ => None,
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            Format::Single => 0,
            Format::Multi => 1,
            Format::Sequential => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    Metrical(u16),
    Timecode { fps: u8, ticks_per_frame: u8 },
}

impl Timing {
    pub fn from_u16(division: u16) -> Self {
        if division & 0x8000 == 0 {
            Timing::Metrical(division)
        } else {
            let [hi, lo] = division.to_be_bytes();
            Timing::Timecode {
                fps: (hi as i8).wrapping_neg() as u8,
                ticks_per_frame: lo,
            }
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            Timing::Metrical(ticks) => ticks & 0x7FFF,
            Timing::Timecode {
                fps,
                ticks_per_frame,
            } => u16::from_be_bytes([(fps as i8).wrapping_neg() as u8, ticks_per_frame]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub format: Format,
    pub timing: Timing,
}

impl Header {
    pub fn new(format: Format, timing: Timing) -> Self {
        Self { format, timing }
    }
}

/// An ordered list of events that always ends with exactly one end-of-track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    events: Vec<TrackEvent>,
}

impl Track {
    /// Interior end-of-track deltas fold into the next event; one terminal
    /// end-of-track is appended.
    pub fn new(events: Vec<TrackEvent>) -> Self {
        let mut normalized: Vec<TrackEvent> = Vec::with_capacity(events.len() + 1);
        let mut carried: u32 = 0;
        for event in events {
            if event.is_end_of_track() {
                carried = carried.saturating_add(event.delta);
                continue;
            }
            let delta = event.delta.saturating_add(carried);
            carried = 0;
            normalized.push(TrackEvent::new(delta, event.event));
        }
        normalized.push(TrackEvent::new(carried, Event::Meta(MetaEvent::EndOfTrack)));
        Self { events: normalized }
    }

    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    pub fn is_meaningful(&self) -> bool {
        self.events.iter().any(|e| {
            matches!(
                e.event,
                Event::Midi {
                    message: Message::NoteOn { .. }
                        | Message::NoteOff { .. }
                        | Message::ControlChange { .. },
                    ..
                }
            )
        })
    }

    pub fn name(&self) -> Option<String> {
        self.events.iter().find_map(|e| match &e.event {
            Event::Meta(MetaEvent::Text {
                kind: TextKind::TrackName,
                text,
            }) => Some(latin1_to_string(text)),
            _ => None,
        })
    }

    pub fn first_program(&self) -> Option<u8> {
        self.events.iter().find_map(|e| match e.event {
            Event::Midi {
                message: Message::ProgramChange { program },
                ..
            } => Some(program),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiDocument {
    pub header: Header,
    pub tracks: Vec<Track>,
}

impl MidiDocument {
    pub fn new(header: Header, tracks: Vec<Track>) -> Self {
        Self { header, tracks }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode(bytes)
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        encode(self)
    }

    pub fn timing(&self) -> Timing {
        self.header.timing
    }
}
