use crate::{
    error::{FastqError, Result},
    quality::QualityScore,
    trimmer::{AdapterTrimmer, CutPoints},
};

pub const NUCLEOTIDES: [u8; 5] = [b'A', b'T', b'G', b'C', b'N'];

const HEADER_DELIMITERS: &[char] = &[' ', '\t'];

/// A single read. Owns its data; trimming yields a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    header: String,
    sequence: String,
    qualities: Vec<QualityScore>,
    trim_start: Option<usize>,
    trim_end: Option<usize>,
}

/// First problem found in a record's fields, before line context is attached.
enum Defect {
    Header,
    Base(char),
    Length { seq_len: usize, qual_len: usize },
}

impl Defect {
    fn find(header: &str, sequence: &str, qualities: &[QualityScore]) -> Option<Defect> {
        if !header.starts_with('@') {
            return Some(Defect::Header);
        }

        if let Some(base) = sequence
            .chars()
            .find(|&c| !c.is_ascii() || !NUCLEOTIDES.contains(&(c as u8)))
        {
            return Some(Defect::Base(base));
        }

        (sequence.len() != qualities.len()).then_some(Defect::Length {
            seq_len: sequence.len(),
            qual_len: qualities.len(),
        })
    }

    fn into_error(self, line: usize, lines: Vec<String>) -> FastqError {
        match self {
            Defect::Header => FastqError::InvalidHeader { line, lines },
            Defect::Base(base) => FastqError::InvalidBase { line, base, lines },
            Defect::Length { seq_len, qual_len } => FastqError::LengthMismatch {
                line,
                seq_len,
                qual_len,
                lines,
            },
        }
    }
}

impl FastqRecord {
    /// `header` keeps its leading `@`.
    pub fn new(
        header: impl Into<String>,
        sequence: impl Into<String>,
        qualities: Vec<QualityScore>,
    ) -> Result<Self> {
        let header = header.into();
        let sequence = sequence.into();

        if let Some(defect) = Defect::find(&header, &sequence, &qualities) {
            return Err(defect.into_error(0, vec![header, sequence]));
        }
        Ok(Self::validated(header, sequence, qualities))
    }

    /// Builds a record from the four raw lines of a record starting at `line`.
    ///
    /// Errors carry all four lines.
    pub(crate) fn from_lines(
        lines: [String; 4],
        qualities: Vec<QualityScore>,
        line: usize,
    ) -> Result<Self> {
        if let Some(defect) = Defect::find(&lines[0], &lines[1], &qualities) {
            return Err(defect.into_error(line, Vec::from(lines)));
        }

        let [header, sequence, _, _] = lines;
        Ok(Self::validated(header, sequence, qualities))
    }

    fn validated(header: String, sequence: String, qualities: Vec<QualityScore>) -> Self {
        FastqRecord {
            header,
            sequence,
            qualities,
            trim_start: None,
            trim_end: None,
        }
    }

    #[inline]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Header text after `@`, up to the first space or tab.
    pub fn id(&self) -> &str {
        let header = &self.header[1..];
        header
            .split_once(HEADER_DELIMITERS)
            .map_or(header, |(id, _)| id)
    }

    pub fn description(&self) -> Option<&str> {
        self.header[1..].split_once(HEADER_DELIMITERS).map(|(_, desc)| desc)
    }

    #[inline]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    #[inline]
    pub fn qualities(&self) -> &[QualityScore] {
        &self.qualities
    }

    #[inline]
    pub fn trim_start(&self) -> Option<usize> {
        self.trim_start
    }

    #[inline]
    pub fn trim_end(&self) -> Option<usize> {
        self.trim_end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Number of trim markers set on this record: 0, 1 or 2.
    #[inline]
    pub fn cuts_count(&self) -> usize {
        self.trim_start.is_some() as usize + self.trim_end.is_some() as usize
    }

    #[inline]
    pub fn base_count(&self, base: u8) -> usize {
        memchr::memchr_iter(base, self.sequence.as_bytes()).count()
    }

    /// Share of `base` in this read, in percent. An empty read yields 0.
    pub fn base_percentage(&self, base: u8) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.base_count(base) as f64 / self.len() as f64 * 100.0
    }

    pub fn gc_percent(&self) -> f64 {
        self.base_percentage(b'G') + self.base_percentage(b'C')
    }

    pub fn mean_quality(&self) -> f64 {
        if self.qualities.is_empty() {
            return 0.0;
        }
        self.qualities.iter().map(|&q| q as f64).sum::<f64>() / self.qualities.len() as f64
    }

    /// Trims adapters found by `trimmer`, leaving `self` untouched.
    pub fn cut(&self, trimmer: &AdapterTrimmer) -> FastqRecord {
        self.with_cut_points(trimmer.find_cut_points(&self.sequence))
    }

    /// Keeps `[start or 0, end or len)` and records both markers.
    ///
    /// Boundaries are clamped into `0 <= start <= end <= len`.
    pub fn with_cut_points(&self, points: CutPoints) -> FastqRecord {
        let len = self.len();
        let start = points.start.map(|s| s.min(len));
        let end = points.end.map(|e| e.clamp(start.unwrap_or(0), len));
        let from = start.unwrap_or(0);
        let to = end.unwrap_or(len).max(from);

        FastqRecord {
            header: self.header.clone(),
            sequence: self.sequence[from..to].to_string(),
            qualities: self.qualities[from..to].to_vec(),
            trim_start: start,
            trim_end: end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq: &str) -> FastqRecord {
        FastqRecord::new("@r1 sample=a", seq, vec![30; seq.len()]).unwrap()
    }

    #[test]
    fn splits_header_into_id_and_description() {
        let rec = record("ACGT");
        assert_eq!(rec.id(), "r1");
        assert_eq!(rec.description(), Some("sample=a"));

        let bare = FastqRecord::new("@r2", "A", vec![1]).unwrap();
        assert_eq!(bare.id(), "r2");
        assert_eq!(bare.description(), None);
    }

    #[test]
    fn rejects_bases_outside_alphabet() {
        match FastqRecord::new("@x", "ACGU", vec![1; 4]) {
            Err(FastqError::InvalidBase { base: 'U', .. }) => {}
            other => panic!("Expected InvalidBase, got {:?}", other),
        }
        assert!(FastqRecord::new("@x", "acgt", vec![1; 4]).is_err());
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(matches!(
            FastqRecord::new("@x", "ACGT", vec![1; 3]),
            Err(FastqError::LengthMismatch { seq_len: 4, qual_len: 3, .. })
        ));
    }

    #[test]
    fn cut_points_are_clamped_and_ordered() {
        let rec = record("ACGTAC");
        let cut = rec.with_cut_points(CutPoints { start: Some(4), end: Some(2) });
        assert_eq!(cut.trim_start(), Some(4));
        assert_eq!(cut.trim_end(), Some(4));
        assert!(cut.is_empty());
        assert_eq!(cut.cuts_count(), 2);
        assert_eq!(rec.len(), 6);
    }

    #[test]
    fn empty_read_has_zero_percentages() {
        let rec = record("ACGT").with_cut_points(CutPoints { start: Some(4), end: None });
        assert_eq!(rec.gc_percent(), 0.0);
        assert_eq!(rec.mean_quality(), 0.0);
    }
}
