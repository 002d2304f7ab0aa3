use crate::{
    collection::RecordCollection,
    error::{FastqError, Result},
    quality::QualityCodec,
    record::FastqRecord,
};
use std::io::BufRead;
use std::iter::FusedIterator;
use tracing::debug;

/// Pulls four-line records out of a buffered text stream.
///
/// Blank lines are skipped. Iteration ends for good once the stream is exhausted or a
/// record fails to parse; reading again needs a fresh stream.
pub struct FastqParser<R: BufRead> {
    reader: R,
    codec: QualityCodec,
    buf: Vec<u8>,
    line: usize,
    records: usize,
    finished: bool,
}

impl<R: BufRead> FastqParser<R> {
    pub fn new(reader: R, codec: QualityCodec) -> Self {
        FastqParser {
            reader,
            codec,
            buf: Vec::with_capacity(256),
            line: 0,
            records: 0,
            finished: false,
        }
    }

    #[inline]
    pub fn codec(&self) -> QualityCodec {
        self.codec
    }

    pub fn parse_record(&mut self) -> Result<Option<FastqRecord>> {
        if self.finished {
            return Ok(None);
        }

        let result = self.read_record();
        match &result {
            Ok(Some(_)) => self.records += 1,
            Ok(None) => {
                self.finished = true;
                debug!(records = self.records, lines = self.line, "reached end of FASTQ stream");
            }
            Err(_) => self.finished = true,
        }
        result
    }

    /// Drains the stream. The first error aborts and nothing is returned.
    pub fn read_collection(self) -> Result<RecordCollection> {
        self.collect::<Result<Vec<_>>>().map(RecordCollection::from)
    }

    fn read_record(&mut self) -> Result<Option<FastqRecord>> {
        let Some((start_line, header)) = self.next_line()? else {
            return Ok(None);
        };

        let mut lines = Vec::with_capacity(4);
        lines.push(header);
        while lines.len() < 4 {
            match self.next_line()? {
                Some((_, line)) => lines.push(line),
                None => break,
            }
        }

        let fields: [String; 4] = match lines.try_into() {
            Ok(fields) => fields,
            Err(lines) => {
                return Err(FastqError::TruncatedRecord {
                    line: start_line,
                    lines,
                })
            }
        };

        let qualities = self.codec.decode(&fields[3]);
        FastqRecord::from_lines(fields, qualities, start_line).map(Some)
    }

    /// Next non-blank line and its 1-based line number, without the line terminator.
    fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let mut end = self.buf.len();
            while end > 0 && matches!(self.buf[end - 1], b'\n' | b'\r') {
                end -= 1;
            }
            if end == 0 {
                continue;
            }

            let text = std::str::from_utf8(&self.buf[..end])?;
            return Ok(Some((self.line, text.to_string())));
        }
    }
}

impl<R: BufRead> Iterator for FastqParser<R> {
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_record().transpose()
    }
}

impl<R: BufRead> FusedIterator for FastqParser<R> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &[u8]) -> Result<Vec<FastqRecord>> {
        FastqParser::new(data, QualityCodec::default()).collect()
    }

    #[test]
    fn skips_blank_lines_between_fields() {
        let records = parse(b"\n@r1\n\nACGT\n+\n\n\nIIII\n\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence(), "ACGT");
        assert_eq!(records[0].qualities(), &[40, 40, 40, 40]);
    }

    #[test]
    fn separator_is_not_validated() {
        let records = parse(b"@r1\nAC\nanything\nII\n").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn truncated_record_reports_lines_read() {
        let err = parse(b"@r1\nACGT\n+\nIIII\n@r2\nACGT\n").unwrap_err();
        match err {
            FastqError::TruncatedRecord { line, lines } => {
                assert_eq!(line, 5);
                assert_eq!(lines, vec!["@r2".to_string(), "ACGT".to_string()]);
            }
            other => panic!("Expected TruncatedRecord, got {:?}", other),
        }
    }

    #[test]
    fn stops_after_error() {
        let data = b"r1\nACGT\n+\nIIII\n@r2\nA\n+\nI\n";
        let mut parser = FastqParser::new(&data[..], QualityCodec::default());
        assert!(parser.next().unwrap().is_err());
        assert!(parser.next().is_none());
    }

    #[test]
    fn field_errors_carry_raw_lines() {
        let err = parse(b"@r1\nACGT\n+\nIIII\n@r2\nACGU\n+\nIIII\n").unwrap_err();
        assert!(matches!(err, FastqError::InvalidBase { line: 5, base: 'U', .. }));
        let expected: Vec<String> = ["@r2", "ACGU", "+", "IIII"].map(String::from).into();
        assert_eq!(err.record_lines(), Some(expected.as_slice()));
    }

    #[test]
    fn reports_invalid_utf8() {
        let err = parse(b"@r1\nAC\n+\n\xff\xfe\n").unwrap_err();
        assert!(matches!(err, FastqError::Utf8Error(_)));
    }
}
