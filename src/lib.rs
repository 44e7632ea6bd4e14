pub mod batch;
pub mod formatter;
pub mod instruments;
pub mod midi_event;
pub mod output;
pub mod smf;
pub mod splitter;

pub use batch::{expand_inputs, run_batch, FileOutcome};
pub use output::{process_file, FileReport, ProcessError};
pub use smf::{DecodeError, EncodeError, MidiDocument};
pub use splitter::{split, OutputUnit, SplitOptions, Splitter, TrackClass, TrackReport};
