use super::error::EncodeError;
use super::vlq;
use super::{MidiDocument, Track};
use crate::midi_event::{Event, MetaEvent, TrackEvent};

/// Running status is never emitted.
pub fn encode(document: &MidiDocument) -> Result<Vec<u8>, EncodeError> {
    let track_count = u16::try_from(document.tracks.len())
        .map_err(|_| EncodeError::TooManyTracks(document.tracks.len()))?;

    let mut out = Vec::with_capacity(14 + document.tracks.len() * 64);
    out.extend_from_slice(b"MThd");
    out.extend_from_slice(&6u32.to_be_bytes());
    out.extend_from_slice(&document.header.format.to_u16().to_be_bytes());
    out.extend_from_slice(&track_count.to_be_bytes());
    out.extend_from_slice(&document.header.timing.to_u16().to_be_bytes());

    for track in &document.tracks {
        write_track(track, &mut out)?;
    }
    Ok(out)
}

fn write_track(track: &Track, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let start = out.len();
    // length is patched in once the events are written
    out.extend_from_slice(b"MTrk\0\0\0\0");
    for event in track.events() {
        write_event(event, out)?;
    }
    let len = out.len() - start - 8;
    let len32 = u32::try_from(len).map_err(|_| EncodeError::ChunkTooLarge(len))?;
    out[start + 4..start + 8].copy_from_slice(&len32.to_be_bytes());
    Ok(())
}

fn write_vlq(value: u64, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    if value > u64::from(vlq::MAX) {
        return Err(EncodeError::ValueTooLarge(value));
    }
    vlq::write(value as u32, out);
    Ok(())
}

fn write_payload(data: &[u8], out: &mut Vec<u8>) -> Result<(), EncodeError> {
    write_vlq(data.len() as u64, out)?;
    out.extend_from_slice(data);
    Ok(())
}

fn write_event(event: &TrackEvent, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    write_vlq(u64::from(event.delta), out)?;
    match &event.event {
        Event::Midi { channel, message } => {
            out.push(message.status_nibble() | (channel & 0x0F));
            let (data, len) = message.data_bytes();
            out.extend(data[..len].iter().map(|b| b & 0x7F));
        }
        Event::Meta(meta) => write_meta(meta, out)?,
        Event::SysEx(data) => {
            out.push(0xF0);
            write_payload(data, out)?;
        }
        Event::Escape(data) => {
            out.push(0xF7);
            write_payload(data, out)?;
        }
    }
    Ok(())
}

fn write_meta(meta: &MetaEvent, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    out.push(0xFF);
    match meta {
        MetaEvent::SequenceNumber(None) => {
            out.push(0x00);
            write_payload(&[], out)
        }
        MetaEvent::SequenceNumber(Some(number)) => {
            out.push(0x00);
            write_payload(&number.to_be_bytes(), out)
        }
        MetaEvent::Text { kind, text } => {
            out.push(kind.to_byte());
            write_payload(text, out)
        }
        MetaEvent::ChannelPrefix(channel) => {
            out.push(0x20);
            write_payload(&[*channel], out)
        }
        MetaEvent::Port(port) => {
            out.push(0x21);
            write_payload(&[*port], out)
        }
        MetaEvent::EndOfTrack => {
            out.push(0x2F);
            write_payload(&[], out)
        }
        MetaEvent::Tempo(micros) => {
            out.push(0x51);
            write_payload(&micros.to_be_bytes()[1..], out)
        }
        MetaEvent::SmpteOffset(fields) => {
            out.push(0x54);
            write_payload(fields, out)
        }
        MetaEvent::TimeSignature {
            numerator,
            denominator_pow2,
            clocks_per_click,
            thirty_seconds_per_quarter,
        } => {
            out.push(0x58);
            write_payload(
                &[
                    *numerator,
                    *denominator_pow2,
                    *clocks_per_click,
                    *thirty_seconds_per_quarter,
                ],
                out,
            )
        }
        MetaEvent::KeySignature { sharps, minor } => {
            out.push(0x59);
            write_payload(&[*sharps as u8, u8::from(*minor)], out)
        }
        MetaEvent::SequencerSpecific(data) => {
            out.push(0x7F);
            write_payload(data, out)
        }
        MetaEvent::Unknown { kind, data } => {
            out.push(*kind);
            write_payload(data, out)
        }
    }
}
