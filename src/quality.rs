use crate::error::{FastqError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Phred score decoded from one quality character: `char code - offset`.
///
/// Signed because decoding is total: characters below the offset yield negative scores.
pub type QualityScore = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QualityEncoding {
    #[default]
    #[serde(rename = "Phred+33")]
    Phred33,
    #[serde(rename = "Phred+64")]
    Phred64,
}

impl QualityEncoding {
    pub const ALL: [QualityEncoding; 2] = [QualityEncoding::Phred33, QualityEncoding::Phred64];

    pub fn offset(&self) -> i32 {
        match self {
            QualityEncoding::Phred33 => 33,
            QualityEncoding::Phred64 => 64,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QualityEncoding::Phred33 => "Phred+33",
            QualityEncoding::Phred64 => "Phred+64",
        }
    }
}

impl FromStr for QualityEncoding {
    type Err = FastqError;

    fn from_str(s: &str) -> Result<Self> {
        QualityEncoding::ALL
            .into_iter()
            .find(|encoding| encoding.name() == s)
            .ok_or_else(|| FastqError::InvalidEncoding { name: s.to_string() })
    }
}

impl fmt::Display for QualityEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts between quality strings and Phred scores for a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityCodec {
    encoding: QualityEncoding,
}

impl QualityCodec {
    #[inline]
    pub fn new(encoding: QualityEncoding) -> Self {
        QualityCodec { encoding }
    }

    /// Builds a codec from an encoding name such as `"Phred+33"`.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse().map(QualityCodec::new)
    }

    #[inline]
    pub fn encoding(&self) -> QualityEncoding {
        self.encoding
    }

    #[inline]
    pub fn offset(&self) -> i32 {
        self.encoding.offset()
    }

    /// One score per character; no range check on the result.
    pub fn decode(&self, qual_string: &str) -> Vec<QualityScore> {
        let offset = self.offset();
        qual_string.chars().map(|c| c as i32 - offset).collect()
    }

    pub fn encode(&self, scores: &[QualityScore]) -> Result<String> {
        let offset = self.offset();
        scores
            .iter()
            .map(|&score| {
                score
                    .checked_add(offset)
                    .and_then(|code| u32::try_from(code).ok())
                    .and_then(char::from_u32)
                    .ok_or(FastqError::InvalidQuality { score, offset })
            })
            .collect()
    }
}

impl Default for QualityCodec {
    fn default() -> Self {
        QualityCodec::new(QualityEncoding::default())
    }
}

impl From<QualityEncoding> for QualityCodec {
    fn from(encoding: QualityEncoding) -> Self {
        QualityCodec::new(encoding)
    }
}
