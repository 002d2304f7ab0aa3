use crate::{
    collection::RecordCollection,
    error::Result,
    parser::FastqParser,
    quality::QualityEncoding,
    record::FastqRecord,
};
use flate2::read::MultiGzDecoder;
use memmap2::MmapOptions;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;
use tracing::debug;

type Source = Box<dyn BufRead + Send>;

/// File or stream backed record source.
pub struct FastqReader {
    parser: FastqParser<Source>,
}

impl FastqReader {
    /// Picks gzip decoding for `.gz` paths, a memory map otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P, encoding: QualityEncoding) -> Result<Self> {
        let path = path.as_ref();

        if path.extension().and_then(|s| s.to_str()) == Some("gz") {
            Self::from_gzip_file(path, encoding)
        } else {
            Self::from_file(path, encoding)
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P, encoding: QualityEncoding) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        debug!(path = %path.display(), bytes = len, "memory-mapping FASTQ file");

        // Zero-length files cannot be mapped.
        if len == 0 {
            return Ok(Self::from_source(Box::new(Cursor::new(Vec::new())), encoding));
        }

        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(Self::from_source(Box::new(Cursor::new(mmap)), encoding))
    }

    pub fn from_gzip_file<P: AsRef<Path>>(path: P, encoding: QualityEncoding) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening gzip-compressed FASTQ file");
        let file = File::open(path)?;
        let decoder = MultiGzDecoder::new(BufReader::new(file));
        Ok(Self::from_source(Box::new(BufReader::new(decoder)), encoding))
    }

    pub fn from_reader<R: Read + Send + 'static>(reader: R, encoding: QualityEncoding) -> Self {
        Self::from_source(Box::new(BufReader::new(reader)), encoding)
    }

    fn from_source(source: Source, encoding: QualityEncoding) -> Self {
        FastqReader {
            parser: FastqParser::new(source, encoding.into()),
        }
    }

    pub fn encoding(&self) -> QualityEncoding {
        self.parser.codec().encoding()
    }

    pub fn into_records(self) -> FastqParser<Source> {
        self.parser
    }

    pub fn read_collection(self) -> Result<RecordCollection> {
        self.parser.read_collection()
    }
}

impl Iterator for FastqReader {
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next()
    }
}
