use super::error::DecodeError;
use super::vlq::{self, VlqError};
use super::{Format, Header, MidiDocument, Timing, Track};
use crate::midi_event::{Event, Message, MetaEvent, TextKind, TrackEvent};

const CHUNK_HEADER_LEN: usize = 8;

/// Reads exactly the declared number of `MTrk` chunks, skipping alien ones.
pub fn decode(bytes: &[u8]) -> Result<MidiDocument, DecodeError> {
    if bytes.len() < CHUNK_HEADER_LEN || &bytes[0..4] != b"MThd" {
        return Err(DecodeError::MalformedHeader);
    }
    let header_len = chunk_len(bytes, 0);
    if header_len < 6 {
        return Err(DecodeError::MalformedHeader);
    }
    let header_data = chunk_data(bytes, 0, header_len)?;

    let format_raw = u16::from_be_bytes([header_data[0], header_data[1]]);
    let declared = u16::from_be_bytes([header_data[2], header_data[3]]);
    let division = u16::from_be_bytes([header_data[4], header_data[5]]);
    let format = Format::from_u16(format_raw).ok_or(DecodeError::UnsupportedFormat(format_raw))?;
    let header = Header::new(format, Timing::from_u16(division));

    let mut offset = CHUNK_HEADER_LEN + header_len;
    let mut tracks = Vec::with_capacity(usize::from(declared));
    while tracks.len() < usize::from(declared) {
        if offset == bytes.len() {
            return Err(DecodeError::TrackCountMismatch {
                declared,
                actual: tracks.len(),
            });
        }
        if bytes.len() - offset < CHUNK_HEADER_LEN {
            return Err(DecodeError::TruncatedFile { offset });
        }
        let len = chunk_len(bytes, offset);
        let data = chunk_data(bytes, offset, len)?;
        if &bytes[offset..offset + 4] == b"MTrk" {
            let decoder = TrackDecoder::new(tracks.len(), data, offset + CHUNK_HEADER_LEN);
            tracks.push(decoder.decode()?);
        }
        offset += CHUNK_HEADER_LEN + len;
    }

    Ok(MidiDocument::new(header, tracks))
}

fn chunk_len(bytes: &[u8], offset: usize) -> usize {
    let raw = [
        bytes[offset + 4],
        bytes[offset + 5],
        bytes[offset + 6],
        bytes[offset + 7],
    ];
    u32::from_be_bytes(raw) as usize
}

fn chunk_data(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8], DecodeError> {
    let start = offset + CHUNK_HEADER_LEN;
    if bytes.len() - start < len {
        return Err(DecodeError::TruncatedFile { offset });
    }
    Ok(&bytes[start..start + len])
}

// Running status is per track.
struct TrackDecoder<'a> {
    index: usize,
    data: &'a [u8],
    // file offset of data[0]
    base: usize,
    pos: usize,
    running_status: Option<u8>,
}

impl<'a> TrackDecoder<'a> {
    fn new(index: usize, data: &'a [u8], base: usize) -> Self {
        Self {
            index,
            data,
            base,
            pos: 0,
            running_status: None,
        }
    }

    fn decode(mut self) -> Result<Track, DecodeError> {
        let mut events = Vec::new();
        while self.pos < self.data.len() {
            let delta = self.read_vlq()?;
            let event = self.read_event()?;
            let end = matches!(event, Event::Meta(MetaEvent::EndOfTrack));
            events.push(TrackEvent::new(delta, event));
            if end {
                break;
            }
        }
        Ok(Track::new(events))
    }

    fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn invalid(&self, reason: &'static str) -> DecodeError {
        DecodeError::InvalidEvent {
            track: self.index,
            offset: self.offset(),
            reason,
        }
    }

    fn read_vlq(&mut self) -> Result<u32, DecodeError> {
        match vlq::read(&self.data[self.pos..]) {
            Ok((value, used)) => {
                self.pos += used;
                Ok(value)
            }
            Err(VlqError::Truncated) => Err(DecodeError::TruncatedFile {
                offset: self.offset(),
            }),
            Err(VlqError::TooLong) => Err(DecodeError::InvalidVarLen {
                offset: self.offset(),
            }),
        }
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.data.get(self.pos).ok_or(DecodeError::TruncatedFile {
            offset: self.offset(),
        })?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.data.len() - self.pos < len {
            return Err(DecodeError::TruncatedFile {
                offset: self.offset(),
            });
        }
        let data: &'a [u8] = self.data;
        let slice = &data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_payload(&mut self) -> Result<Vec<u8>, DecodeError> {
        let len = self.read_vlq()? as usize;
        Ok(self.read_slice(len)?.to_vec())
    }

    fn read_event(&mut self) -> Result<Event, DecodeError> {
        let first = *self.data.get(self.pos).ok_or(DecodeError::TruncatedFile {
            offset: self.offset(),
        })?;
        match first {
            0xFF => {
                self.pos += 1;
                let kind = self.read_byte()?;
                let data = self.read_payload()?;
                Ok(Event::Meta(parse_meta(kind, data)))
            }
            0xF0 => {
                self.pos += 1;
                Ok(Event::SysEx(self.read_payload()?))
            }
            0xF7 => {
                self.pos += 1;
                Ok(Event::Escape(self.read_payload()?))
            }
            0xF1..=0xFE => Err(self.invalid("system message inside a track")),
            0x80..=0xEF => {
                self.pos += 1;
                self.running_status = Some(first);
                self.read_channel_message(first)
            }
            _ => match self.running_status {
                Some(status) => self.read_channel_message(status),
                None => Err(self.invalid("data byte without running status")),
            },
        }
    }

    fn read_channel_message(&mut self, status: u8) -> Result<Event, DecodeError> {
        let nibble = status & 0xF0;
        let channel = status & 0x0F;
        let data = self.read_slice(Message::data_len(nibble))?;
        if data.iter().any(|b| b & 0x80 != 0) {
            self.pos -= data.len();
            return Err(self.invalid("channel data byte has the high bit set"));
        }
        let message = Message::from_parts(nibble, data)
            .ok_or_else(|| self.invalid("unknown channel status"))?;
        Ok(Event::Midi { channel, message })
    }
}

fn parse_meta(kind: u8, data: Vec<u8>) -> MetaEvent {
    let fixed = match (kind, data.as_slice()) {
        (0x00, []) => Some(MetaEvent::SequenceNumber(None)),
        (0x00, &[hi, lo]) => Some(MetaEvent::SequenceNumber(Some(u16::from_be_bytes([hi, lo])))),
        (0x20, &[channel]) => Some(MetaEvent::ChannelPrefix(channel)),
        (0x21, &[port]) => Some(MetaEvent::Port(port)),
        (0x2F, _) => Some(MetaEvent::EndOfTrack),
        (0x51, &[a, b, c]) => Some(MetaEvent::Tempo(u32::from_be_bytes([0, a, b, c]))),
        (0x54, &[hr, mn, se, fr, ff]) => Some(MetaEvent::SmpteOffset([hr, mn, se, fr, ff])),
        (0x58, &[nn, dd, cc, bb]) => Some(MetaEvent::TimeSignature {
            numerator: nn,
            denominator_pow2: dd,
            clocks_per_click: cc,
            thirty_seconds_per_quarter: bb,
        }),
        (0x59, &[sf, mi @ (0 | 1)]) => Some(MetaEvent::KeySignature {
            sharps: sf as i8,
            minor: mi == 1,
        }),
        _ => None,
    };
    if let Some(meta) = fixed {
        return meta;
    }
    if kind == 0x7F {
        return MetaEvent::SequencerSpecific(data);
    }
    match TextKind::from_byte(kind) {
        Some(kind) => MetaEvent::Text { kind, text: data },
        None => MetaEvent::Unknown { kind, data },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(format: u16, tracks: &[&[u8]]) -> Vec<u8> {
        let mut out = b"MThd\0\0\0\x06".to_vec();
        out.extend_from_slice(&format.to_be_bytes());
        out.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
        out.extend_from_slice(&96u16.to_be_bytes());
        for track in tracks {
            out.extend_from_slice(b"MTrk");
            out.extend_from_slice(&(track.len() as u32).to_be_bytes());
            out.extend_from_slice(track);
        }
        out
    }

    #[test]
    fn rejects_missing_magic() {
        assert_eq!(decode(b"RIFF\0\0\0\x06\0\x01\0\x01\0\x60"), Err(DecodeError::MalformedHeader));
        assert_eq!(decode(b"MTh"), Err(DecodeError::MalformedHeader));
        assert_eq!(decode(b"MThd\0\0\0\x04\0\x01\0\x01"), Err(DecodeError::MalformedHeader));
    }

    #[test]
    fn rejects_unknown_format() {
        let bytes = file(3, &[&[0x00, 0xFF, 0x2F, 0x00]]);
        assert_eq!(decode(&bytes), Err(DecodeError::UnsupportedFormat(3)));
    }

    #[test]
    fn rejects_chunk_longer_than_file() {
        let mut bytes = file(1, &[&[0x00, 0xFF, 0x2F, 0x00]]);
        bytes.truncate(bytes.len() - 1);
        assert_eq!(decode(&bytes), Err(DecodeError::TruncatedFile { offset: 14 }));
    }

    #[test]
    fn rejects_missing_tracks() {
        let mut bytes = file(1, &[&[0x00, 0xFF, 0x2F, 0x00]]);
        bytes[11] = 2;
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::TrackCountMismatch {
                declared: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn skips_alien_chunks_and_long_headers() {
        let mut bytes = b"MThd\0\0\0\x08\0\x00\0\x01\0\x60\xAA\xBB".to_vec();
        bytes.extend_from_slice(b"XFIH\0\0\0\x02\x01\x02");
        bytes.extend_from_slice(b"MTrk\0\0\0\x04\x00\xFF\x2F\x00");
        let doc = decode(&bytes).unwrap();
        assert_eq!(doc.header.format, Format::Single);
        assert_eq!(doc.tracks.len(), 1);
    }

    #[test]
    fn expands_running_status() {
        let bytes = file(
            0,
            &[&[
                0x00, 0x90, 0x3C, 0x64, // note on
                0x10, 0x3E, 0x64, // running status note on
                0x00, 0xFF, 0x03, 0x01, b'x', // meta keeps running status
                0x10, 0x3C, 0x00, // running status again
                0x00, 0xFF, 0x2F, 0x00,
            ]],
        );
        let doc = decode(&bytes).unwrap();
        let events = doc.tracks[0].events();
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[3],
            TrackEvent::new(
                0x10,
                Event::Midi {
                    channel: 0,
                    message: Message::NoteOn {
                        key: 0x3C,
                        velocity: 0
                    }
                }
            )
        );
    }

    #[test]
    fn running_status_does_not_cross_tracks() {
        let bytes = file(
            1,
            &[
                &[0x00, 0x90, 0x3C, 0x64, 0x00, 0xFF, 0x2F, 0x00],
                &[0x00, 0x3C, 0x64, 0x00, 0xFF, 0x2F, 0x00],
            ],
        );
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::InvalidEvent {
                track: 1,
                offset: 39,
                reason: "data byte without running status"
            })
        );
    }

    #[test]
    fn stops_at_end_of_track_and_appends_when_missing() {
        let bytes = file(
            1,
            &[
                &[0x00, 0xFF, 0x2F, 0x00, 0x00, 0x90, 0x3C, 0x64],
                &[0x00, 0xC0, 0x05],
            ],
        );
        let doc = decode(&bytes).unwrap();
        assert_eq!(doc.tracks[0].events().len(), 1);
        assert_eq!(doc.tracks[1].events().len(), 2);
        assert!(doc.tracks[1].events()[1].is_end_of_track());
        assert_eq!(doc.tracks[1].first_program(), Some(5));
    }

    #[test]
    fn event_cut_short_is_truncation() {
        let bytes = file(1, &[&[0x00, 0x90, 0x3C]]);
        assert!(matches!(decode(&bytes), Err(DecodeError::TruncatedFile { .. })));
    }

    #[test]
    fn odd_sized_meta_is_kept_raw() {
        assert_eq!(
            parse_meta(0x51, vec![0x07, 0xA1]),
            MetaEvent::Unknown {
                kind: 0x51,
                data: vec![0x07, 0xA1]
            }
        );
        assert_eq!(parse_meta(0x51, vec![0x07, 0xA1, 0x20]), MetaEvent::Tempo(500_000));
        assert_eq!(
            parse_meta(0x59, vec![0xFD, 0x01]),
            MetaEvent::KeySignature {
                sharps: -3,
                minor: true
            }
        );
    }
}
