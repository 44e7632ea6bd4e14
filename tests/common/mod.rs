//! Hand-assembled SMF fixtures, written byte by byte so the decoder is tested
//! against real wire data rather than its own encoder.

#![allow(dead_code)]

pub const END_OF_TRACK: &[u8] = &[0x00, 0xFF, 0x2F, 0x00];

pub fn smf(format: u16, division: u16, tracks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = b"MThd\0\0\0\x06".to_vec();
    out.extend_from_slice(&format.to_be_bytes());
    out.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    out.extend_from_slice(&division.to_be_bytes());
    for track in tracks {
        out.extend_from_slice(b"MTrk");
        out.extend_from_slice(&(track.len() as u32).to_be_bytes());
        out.extend_from_slice(track);
    }
    out
}

pub fn vlq(mut value: u32) -> Vec<u8> {
    let mut out = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        out.insert(0, 0x80 | (value & 0x7F) as u8);
        value >>= 7;
    }
    out
}

pub fn track_name(name: &str) -> Vec<u8> {
    let mut out = vec![0x00, 0xFF, 0x03];
    out.extend_from_slice(&vlq(name.len() as u32));
    out.extend_from_slice(name.as_bytes());
    out
}

/// Tempo 120 bpm and 4/4.
pub fn master_track() -> Vec<u8> {
    let mut out = vec![
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo
        0x00, 0xFF, 0x58, 0x04, 0x04, 0x02, 0x18, 0x08, // time signature
    ];
    out.extend_from_slice(END_OF_TRACK);
    out
}

/// A named track with a program change and a few notes, using running status.
pub fn instrument_track(name: &str, channel: u8, program: u8) -> Vec<u8> {
    let mut out = track_name(name);
    out.extend_from_slice(&[0x00, 0xC0 | channel, program]);
    out.extend_from_slice(&[
        0x00, 0x90 | channel, 0x3C, 0x64, // C4 on
        0x60, 0x3C, 0x00, // C4 off via running status
        0x00, 0x3E, 0x64, // D4 on
        0x60, 0x3E, 0x00, // D4 off
    ]);
    out.extend_from_slice(END_OF_TRACK);
    out
}

/// A track with only meta events.
pub fn silent_track(name: &str) -> Vec<u8> {
    let mut out = track_name(name);
    out.extend_from_slice(&[0x00, 0xFF, 0x01, 0x03, b'h', b'e', b'y']);
    out.extend_from_slice(END_OF_TRACK);
    out
}

/// Track 0 tempo only, track 1 "Lead" on piano with notes, track 2 silent.
pub fn three_track_song() -> Vec<u8> {
    smf(
        1,
        480,
        &[
            vec![0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, 0x00, 0xFF, 0x2F, 0x00],
            instrument_track("Lead", 0, 0),
            silent_track("Pad"),
        ],
    )
}
