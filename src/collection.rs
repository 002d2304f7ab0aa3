use crate::{record::FastqRecord, trimmer::AdapterTrimmer};
use rayon::prelude::*;
use std::slice;
use tracing::debug;

/// All reads of one file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCollection {
    records: Vec<FastqRecord>,
}

impl RecordCollection {
    pub fn new(records: Vec<FastqRecord>) -> Self {
        RecordCollection { records }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn records(&self) -> &[FastqRecord] {
        &self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, FastqRecord> {
        self.records.iter()
    }

    /// New collection of trimmed copies; `self` is left as it was.
    pub fn cut(&self, trimmer: &AdapterTrimmer) -> RecordCollection {
        debug!(records = self.len(), "trimming adapters");
        self.records.iter().map(|rec| rec.cut(trimmer)).collect()
    }

    /// Same result as [`RecordCollection::cut`], computed on the rayon pool.
    pub fn par_cut(&self, trimmer: &AdapterTrimmer) -> RecordCollection {
        debug!(
            records = self.len(),
            threads = rayon::current_num_threads(),
            "trimming adapters in parallel"
        );
        RecordCollection::new(self.records.par_iter().map(|rec| rec.cut(trimmer)).collect())
    }
}

impl From<Vec<FastqRecord>> for RecordCollection {
    fn from(records: Vec<FastqRecord>) -> Self {
        RecordCollection::new(records)
    }
}

impl FromIterator<FastqRecord> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = FastqRecord>>(iter: I) -> Self {
        RecordCollection::new(iter.into_iter().collect())
    }
}

impl IntoIterator for RecordCollection {
    type Item = FastqRecord;
    type IntoIter = std::vec::IntoIter<FastqRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a FastqRecord;
    type IntoIter = slice::Iter<'a, FastqRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
