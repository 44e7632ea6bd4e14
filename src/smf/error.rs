use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("file does not start with a valid MThd header chunk")]
    MalformedHeader,
    #[error("chunk at offset {offset} runs past the end of the file")]
    TruncatedFile { offset: usize },
    #[error("unsupported SMF format type {0}")]
    UnsupportedFormat(u16),
    #[error("header declares {declared} tracks but {actual} were found")]
    TrackCountMismatch { declared: u16, actual: usize },
    #[error("variable-length quantity at offset {offset} exceeds 4 bytes")]
    InvalidVarLen { offset: usize },
    #[error("invalid event in track {track} at offset {offset}: {reason}")]
    InvalidEvent {
        track: usize,
        offset: usize,
        reason: &'static str,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("{0} tracks exceed the 16-bit track count")]
    TooManyTracks(usize),
    #[error("track chunk of {0} bytes exceeds the 32-bit chunk length")]
    ChunkTooLarge(usize),
    #[error("value {0} does not fit in a variable-length quantity")]
    ValueTooLarge(u64),
}
