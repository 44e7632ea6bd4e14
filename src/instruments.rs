pub static GENERAL_MIDI: [&str; 128] = [
    "Acoustic Grand Piano",
    "Bright Acoustic Piano",
    "Electric Grand Piano",
    "Honky-Tonk Piano",
    "Rhodes Piano",
    "Chorused Piano",
    "Harpsichord",
    "Clavinet",
    "Celesta",
    "Glockenspiel",
    "Music Box",
    "Vibraphone",
    "Marimba",
    "Xylophone",
    "Tubular Bells",
    "Dulcimer",
    "Hammond Organ",
    "Percussive Organ",
    "Rock Organ",
    "Church Organ",
    "Reed Organ",
    "Accordion",
    "Harmonica",
    "Tango Accordion",
    "Acoustic Guitar - Nylon",
    "Acoustic Guitar - Steel",
    "Electric Guitar - Jazz",
    "Electric Guitar - Clean",
    "Electric Guitar - Muted",
    "Overdriven Guitar",
    "Distortion Guitar",
    "Guitar Harmonics",
    "Acoustic Bass",
    "Electric Bass - Finger",
    "Electric Bass - Pick",
    "Fretless Bass",
    "Slap Bass 1",
    "Slap Bass 2",
    "Synth Bass 1",
    "Synth Bass 2",
    "Violin",
    "Viola",
    "Cello",
    "Contrabass",
    "Tremolo Strings",
    "Pizzicato Strings",
    "Orchestral Harp",
    "Timpani",
    "String Ensemble 1",
    "String Ensemble 2",
    "Synth. Strings 1",
    "Synth. Strings 2",
    "Choir Aahs",
    "Voice Oohs",
    "Synth Voice",
    "Orchestra Hit",
    "Trumpet",
    "Trombone",
    "Tuba",
    "Muted Trumpet",
    "French Horn",
    "Brass Section",
    "Synth. Brass 1",
    "Synth. Brass 2",
    "Soprano Sax",
    "Alto Sax",
    "Tenor Sax",
    "Baritone Sax",
    "Oboe",
    "English Horn",
    "Bassoon",
    "Clarinet",
    "Piccolo",
    "Flute",
    "Recorder",
    "Pan Flute",
    "Bottle Blow",
    "Shakuhachi",
    "Whistle",
    "Ocarina",
    "Synth Lead 1 - Square",
    "Synth Lead 2 - Sawtooth",
    "Synth Lead 3 - Calliope",
    "Synth Lead 4 - Chiff",
    "Synth Lead 5 - Charang",
    "Synth Lead 6 - Voice",
    "Synth Lead 7 - Fifths",
    "Synth Lead 8 - Brass + Lead",
    "Synth Pad 1 - New Age",
    "Synth Pad 2 - Warm",
    "Synth Pad 3 - Polysynth",
    "Synth Pad 4 - Choir",
    "Synth Pad 5 - Bowed",
    "Synth Pad 6 - Metallic",
    "Synth Pad 7 - Halo",
    "Synth Pad 8 - Sweep",
    "FX 1 - Rain",
    "FX 2 - Soundtrack",
    "FX 3 - Crystal",
    "FX 4 - Atmosphere",
    "FX 5 - Brightness",
    "FX 6 - Goblins",
    "FX 7 - Echoes",
    "FX 8 - Sci-Fi",
    "Sitar",
    "Banjo",
    "Shamisen",
    "Koto",
    "Kalimba",
    "Bagpipe",
    "Fiddle",
    "Shanai",
    "Tinkle Bell",
    "Agogo",
    "Steel Drums",
    "Woodblock",
    "Taiko Drum",
    "Melodic Tom",
    "Synth Drum",
    "Reverse Cymbal",
    "Guitar Fret Noise",
    "Breath Noise",
    "Seashore",
    "Bird Tweet",
    "Telephone Ring",
    "Helicopter",
    "Applause",
    "Gunshot",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrument {
    Program(u8, &'static str),
    Unknown,
    Absent,
}

impl Instrument {
    pub fn from_program(program: u8) -> Self {
        match GENERAL_MIDI.get(usize::from(program)).copied() {
            Some(name) => Instrument::Program(program, name),
            None => Instrument::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Instrument::Program(_, name) => *name,
            Instrument::Unknown => "Unknown Instrument",
            Instrument::Absent => "No Instrument",
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Instrument::Absent)
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
