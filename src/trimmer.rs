//! Adapter trimming by exact partial overlap at the read boundaries.
//!
//! The start adapter is searched as a suffix overlapping the beginning of the read, the end
//! adapter as a prefix overlapping the end of the read. Longer overlaps always win.

use crate::error::{FastqError, Result};
use crate::record::NUCLEOTIDES;

pub const DEFAULT_MIN_OVERLAP: usize = 3;

/// Slice boundaries into an untrimmed sequence.
///
/// `start` is the index the retained part begins at (the start-adapter overlap length),
/// `end` is the index it stops before (`len - end-adapter overlap`). `None` means no adapter
/// was found on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CutPoints {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterTrimmer {
    start_adapter: String,
    end_adapter: String,
    min_overlap: usize,
}

impl AdapterTrimmer {
    pub fn new(start_adapter: impl Into<String>, end_adapter: impl Into<String>) -> Self {
        AdapterTrimmer {
            start_adapter: start_adapter.into(),
            end_adapter: end_adapter.into(),
            min_overlap: DEFAULT_MIN_OVERLAP,
        }
    }

    /// Like [`AdapterTrimmer::new`], but rejects adapters outside the nucleotide alphabet.
    pub fn checked(
        start_adapter: impl Into<String>,
        end_adapter: impl Into<String>,
    ) -> Result<Self> {
        let trimmer = Self::new(start_adapter, end_adapter);
        for adapter in [&trimmer.start_adapter, &trimmer.end_adapter] {
            validate_adapter(adapter)?;
        }
        Ok(trimmer)
    }

    pub fn min_overlap(mut self, overlap: usize) -> Self {
        self.min_overlap = overlap;
        self
    }

    pub fn start_adapter(&self) -> &str {
        &self.start_adapter
    }

    pub fn end_adapter(&self) -> &str {
        &self.end_adapter
    }

    pub fn overlap_threshold(&self) -> usize {
        self.min_overlap
    }

    /// Length of the longest start-adapter suffix the sequence begins with.
    ///
    /// Only suffixes strictly longer than the minimum overlap are candidates.
    pub fn start_overlap(&self, seq: &str) -> Option<usize> {
        let adapter = self.start_adapter.as_bytes();
        let seq = seq.as_bytes();

        (self.min_overlap.saturating_add(1)..=adapter.len())
            .rev()
            .find(|&len| seq.starts_with(&adapter[adapter.len() - len..]))
    }

    /// Length of the longest end-adapter prefix the sequence ends with.
    ///
    /// Prefixes of at least the minimum overlap (and never empty) are candidates.
    pub fn end_overlap(&self, seq: &str) -> Option<usize> {
        let adapter = self.end_adapter.as_bytes();
        let seq = seq.as_bytes();

        (self.min_overlap.max(1)..=adapter.len())
            .rev()
            .find(|&len| seq.ends_with(&adapter[..len]))
    }

    pub fn find_cut_points(&self, seq: &str) -> CutPoints {
        let start = self.start_overlap(seq);
        let end = self
            .end_overlap(seq)
            .map(|overlap| (seq.len() - overlap).max(start.unwrap_or(0)));

        CutPoints { start, end }
    }
}

pub(crate) fn validate_adapter(adapter: &str) -> Result<()> {
    if adapter.bytes().all(|b| NUCLEOTIDES.contains(&b)) {
        Ok(())
    } else {
        Err(FastqError::InvalidAdapter {
            adapter: adapter.to_string(),
        })
    }
}
