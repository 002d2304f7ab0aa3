use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FastqError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    #[error("Unknown quality score type: \"{name}\". Available types: Phred+33, Phred+64")]
    InvalidEncoding { name: String },

    #[error("Invalid header: expected '@' at line {line}")]
    InvalidHeader { line: usize, lines: Vec<String> },

    #[error("Record starting at line {line} is truncated ({} of 4 lines read)", .lines.len())]
    TruncatedRecord { line: usize, lines: Vec<String> },

    #[error("Sequence and quality lengths don't match at line {line} (seq: {seq_len}, qual: {qual_len})")]
    LengthMismatch {
        line: usize,
        seq_len: usize,
        qual_len: usize,
        lines: Vec<String>,
    },

    #[error("Invalid base character {base:?} in record at line {line}")]
    InvalidBase {
        line: usize,
        base: char,
        lines: Vec<String>,
    },

    #[error("Quality score {score} cannot be encoded with offset {offset}")]
    InvalidQuality { score: i32, offset: i32 },

    #[error("Invalid adapter sequence: {adapter}")]
    InvalidAdapter { adapter: String },

    #[error("No {side} adapter configured")]
    MissingAdapter { side: &'static str },

    #[error("Statistics requested on an empty record collection")]
    EmptyCollection,
}

impl FastqError {
    /// True for errors raised because an input record is malformed.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            FastqError::InvalidHeader { .. }
                | FastqError::TruncatedRecord { .. }
                | FastqError::LengthMismatch { .. }
                | FastqError::InvalidBase { .. }
        )
    }

    /// Raw lines of the malformed record, for format errors.
    pub fn record_lines(&self) -> Option<&[String]> {
        match self {
            FastqError::InvalidHeader { lines, .. }
            | FastqError::TruncatedRecord { lines, .. }
            | FastqError::LengthMismatch { lines, .. }
            | FastqError::InvalidBase { lines, .. } => Some(lines.as_slice()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FastqError>;
