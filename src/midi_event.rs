#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent {
    pub delta: u32,
    pub event: Event,
}

impl TrackEvent {
    pub fn new(delta: u32, event: Event) -> Self {
        Self { delta, event }
    }

    pub fn is_end_of_track(&self) -> bool {
        matches!(self.event, Event::Meta(MetaEvent::EndOfTrack))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Midi { channel: u8, message: Message },
    Meta(MetaEvent),
    SysEx(Vec<u8>),
    Escape(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    NoteOff { key: u8, velocity: u8 },
    NoteOn { key: u8, velocity: u8 },
    Aftertouch { key: u8, pressure: u8 },
    ControlChange { controller: u8, value: u8 },
    ProgramChange { program: u8 },
    ChannelPressure { pressure: u8 },
    PitchBend { value: u16 },
}

impl Message {
    pub fn status_nibble(&self) -> u8 {
        match self {
            Message::NoteOff { .. } => 0x80,
            Message::NoteOn { .. } => 0x90,
            Message::Aftertouch { .. } => 0xA0,
            Message::ControlChange { .. } => 0xB0,
            Message::ProgramChange { .. } => 0xC0,
            Message::ChannelPressure { .. } => 0xD0,
            Message::PitchBend { .. } => 0xE0,
        }
    }

    pub fn data_len(status_nibble: u8) -> usize {
        match status_nibble {
            0xC0 | 0xD0 => 1,
            _ => 2,
        }
    }

    /// `data` must hold at least [`Message::data_len`] bytes.
    pub fn from_parts(status_nibble: u8, data: &[u8]) -> Option<Self> {
        let message = match status_nibble {
            0x80 => Message::NoteOff {
                key: data[0],
                velocity: data[1],
            },
            0x90 => Message::NoteOn {
                key: data[0],
                velocity: data[1],
            },
            0xA0 => Message::Aftertouch {
                key: data[0],
                pressure: data[1],
            },
            0xB0 => Message::ControlChange {
                controller: data[0],
                value: data[1],
            },
            0xC0 => Message::ProgramChange { program: data[0] },
            0xD0 => Message::ChannelPressure { pressure: data[0] },
            0xE0 => Message::PitchBend {
                value: u16::from(data[0]) | (u16::from(data[1]) << 7),
            },
            _ => return None,
        };
        Some(message)
    }

    pub fn data_bytes(&self) -> ([u8; 2], usize) {
        match *self {
            Message::NoteOff { key, velocity } | Message::NoteOn { key, velocity } => {
                ([key, velocity], 2)
            }
            Message::Aftertouch { key, pressure } => ([key, pressure], 2),
            Message::ControlChange { controller, value } => ([controller, value], 2),
            Message::ProgramChange { program } => ([program, 0], 1),
            Message::ChannelPressure { pressure } => ([pressure, 0], 1),
            Message::PitchBend { value } => ([(value & 0x7F) as u8, ((value >> 7) & 0x7F) as u8], 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaEvent {
    SequenceNumber(Option<u16>),
    Text { kind: TextKind, text: Vec<u8> },
    ChannelPrefix(u8),
    Port(u8),
    EndOfTrack,
    Tempo(u32),
    SmpteOffset([u8; 5]),
    TimeSignature {
        numerator: u8,
        denominator_pow2: u8,
        clocks_per_click: u8,
        thirty_seconds_per_quarter: u8,
    },
    KeySignature { sharps: i8, minor: bool },
    SequencerSpecific(Vec<u8>),
    // also fixed-size types whose length is off, so they write back unchanged
    Unknown { kind: u8, data: Vec<u8> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Text,
    Copyright,
    TrackName,
    InstrumentName,
    Lyric,
    Marker,
    CuePoint,
    ProgramName,
    DeviceName,
    Reserved(u8),
}

impl TextKind {
    pub fn from_byte(kind: u8) -> Option<Self> {
        let kind = match kind {
            0x01 => TextKind::Text,
            0x02 => TextKind::Copyright,
            0x03 => TextKind::TrackName,
            0x04 => TextKind::InstrumentName,
            0x05 => TextKind::Lyric,
            0x06 => TextKind::Marker,
            0x07 => TextKind::CuePoint,
            0x08 => TextKind::ProgramName,
            0x09 => TextKind::DeviceName,
            0x0A..=0x0F => TextKind::Reserved(kind),
            _ => return None,
        };
        Some(kind)
    }

    pub fn to_byte(self) -> u8 {
        match self {
            TextKind::Text => 0x01,
            TextKind::Copyright => 0x02,
            TextKind::TrackName => 0x03,
            TextKind::InstrumentName => 0x04,
            TextKind::Lyric => 0x05,
            TextKind::Marker => 0x06,
            TextKind::CuePoint => 0x07,
            TextKind::ProgramName => 0x08,
            TextKind::DeviceName => 0x09,
            TextKind::Reserved(kind) => kind,
        }
    }
}

/// Decode meta text the way most sequencers write it: one byte per character
/// (Latin-1).
pub fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
