use std::path::PathBuf;
use thiserror::Error;

/// Broad failure category, so callers can branch without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input: modifier, value or path. Nothing on disk was touched.
    Input,
    /// The file is not a readable ID3v2 tag, or the rebuilt tag cannot be encoded.
    Format,
    /// Reading, writing or replacing a file failed.
    Io,
}

#[derive(Error, Debug)]
pub enum TagError {
    #[error("unsupported modifier: {0}")]
    UnsupportedModifier(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("value is too long: {len} bytes (max {max})")]
    ValueTooLong { len: usize, max: usize },

    #[error("unable to open {}: file not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("ID3 no header found")]
    NoHeader,

    #[error("ID3 header truncated: {0} of 10 bytes")]
    TruncatedHeader(usize),

    #[error("ID3 tag truncated: declared {declared} bytes, {available} available")]
    TruncatedTag { declared: u32, available: u64 },

    #[error("ID3 tag too large: {size} bytes does not fit a syncsafe size")]
    TagTooLarge { size: u64 },

    #[error("unknown frame id: {0}")]
    UnknownFrame(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to replace {}: {source}", path.display())]
    Commit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TagError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TagError::UnsupportedModifier(_)
            | TagError::MissingArgument(_)
            | TagError::ValueTooLong { .. }
            | TagError::FileNotFound(_) => ErrorKind::Input,
            TagError::NoHeader
            | TagError::TruncatedHeader(_)
            | TagError::TruncatedTag { .. }
            | TagError::TagTooLarge { .. }
            | TagError::UnknownFrame(_) => ErrorKind::Format,
            TagError::Io(_) | TagError::Commit { .. } => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, TagError>;
