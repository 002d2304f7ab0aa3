pub mod analyzer;
pub mod collection;
pub mod config;
pub mod error;
pub mod parser;
pub mod quality;
pub mod reader;
pub mod record;
pub mod stats;
pub mod trimmer;
pub mod writer;

pub use analyzer::{AnalysisOutcome, Analyzer};
pub use collection::RecordCollection;
pub use config::{AdapterSettings, AdapterSource, AnalyzerConfig, TrimConfig};
pub use error::{FastqError, Result};
pub use parser::FastqParser;
pub use quality::{QualityCodec, QualityEncoding, QualityScore};
pub use reader::FastqReader;
pub use record::FastqRecord;
pub use stats::{NucleotideComposition, PositionComposition, Report, Summary};
pub use trimmer::{AdapterTrimmer, CutPoints};
pub use writer::FastqWriter;
