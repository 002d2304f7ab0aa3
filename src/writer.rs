use crate::{
    error::Result,
    quality::{QualityCodec, QualityEncoding},
    record::FastqRecord,
};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

enum Sink<W: Write> {
    Plain(BufWriter<W>),
    Gzip(GzEncoder<BufWriter<W>>),
}

/// Writes records back out in the four-line layout.
pub struct FastqWriter<W: Write> {
    sink: Sink<W>,
    codec: QualityCodec,
    written: usize,
    finished: bool,
}

impl FastqWriter<File> {
    /// Gzip-compresses when the path ends in `.gz`.
    pub fn to_file<P: AsRef<Path>>(path: P, encoding: QualityEncoding) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;

        if path.extension().and_then(|s| s.to_str()) == Some("gz") {
            Ok(FastqWriter::new_gzip(file, encoding, Compression::default()))
        } else {
            Ok(FastqWriter::new(file, encoding))
        }
    }
}

impl<W: Write> FastqWriter<W> {
    pub fn new(writer: W, encoding: QualityEncoding) -> Self {
        FastqWriter {
            sink: Sink::Plain(BufWriter::new(writer)),
            codec: QualityCodec::new(encoding),
            written: 0,
            finished: false,
        }
    }

    pub fn new_gzip(writer: W, encoding: QualityEncoding, compression: Compression) -> Self {
        FastqWriter {
            sink: Sink::Gzip(GzEncoder::new(BufWriter::new(writer), compression)),
            codec: QualityCodec::new(encoding),
            written: 0,
            finished: false,
        }
    }

    /// Records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write_record(&mut self, record: &FastqRecord) -> Result<()> {
        let qual_string = self.codec.encode(record.qualities())?;

        let writer: &mut dyn Write = match &mut self.sink {
            Sink::Plain(w) => w,
            Sink::Gzip(w) => w,
        };

        writer.write_all(record.header().as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(record.sequence().as_bytes())?;
        writer.write_all(b"\n+\n")?;
        writer.write_all(qual_string.as_bytes())?;
        writer.write_all(b"\n")?;

        self.written += 1;
        Ok(())
    }

    pub fn write_all_records<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a FastqRecord>,
    {
        for record in records {
            self.write_record(record)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        match &mut self.sink {
            Sink::Plain(w) => w.flush()?,
            Sink::Gzip(w) => w.flush()?,
        }
        Ok(())
    }

    /// Flushes and, for gzip output, writes the stream trailer.
    pub fn finish(mut self) -> Result<()> {
        match &mut self.sink {
            Sink::Plain(w) => w.flush()?,
            Sink::Gzip(w) => {
                w.try_finish()?;
                w.get_mut().flush()?;
            }
        }
        self.finished = true;
        Ok(())
    }
}

impl<W: Write> Drop for FastqWriter<W> {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.flush();
        }
    }
}
