use crate::{
    error::{FastqError, Result},
    quality::QualityEncoding,
    trimmer::{validate_adapter, AdapterTrimmer},
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Overlaps shorter than this match adapters by chance too often.
pub const MIN_OVERLAP_FLOOR: usize = 3;

pub const TRIMMED_OUTPUT_NAME: &str = "cut_result.fastq";

/// An adapter given inline or as a text file holding the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterSource {
    Sequence(String),
    File(PathBuf),
}

impl AdapterSource {
    pub fn resolve(&self) -> Result<String> {
        let raw = match self {
            AdapterSource::Sequence(seq) => seq.clone(),
            AdapterSource::File(path) => fs::read_to_string(path)?,
        };
        let adapter = raw.trim().to_ascii_uppercase();
        validate_adapter(&adapter)?;
        Ok(adapter)
    }
}

/// Adapter inputs before resolution. `shared` fills whichever side is not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterSettings {
    pub shared: Option<AdapterSource>,
    pub start: Option<AdapterSource>,
    pub end: Option<AdapterSource>,
    pub min_overlap: usize,
}

impl AdapterSettings {
    pub fn resolve(&self) -> Result<TrimConfig> {
        let pick = |side: Option<&AdapterSource>, name: &'static str| {
            side.or(self.shared.as_ref())
                .ok_or(FastqError::MissingAdapter { side: name })?
                .resolve()
        };

        let start_adapter = pick(self.start.as_ref(), "start")?;
        let end_adapter = pick(self.end.as_ref(), "end")?;
        TrimConfig::new(start_adapter, end_adapter, self.min_overlap)
    }
}

/// Validated adapters with the overlap floor applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimConfig {
    trimmer: AdapterTrimmer,
}

impl TrimConfig {
    /// Validates both adapters and raises `min_overlap` to [`MIN_OVERLAP_FLOOR`].
    pub fn new(
        start_adapter: impl Into<String>,
        end_adapter: impl Into<String>,
        min_overlap: usize,
    ) -> Result<Self> {
        let trimmer = AdapterTrimmer::checked(start_adapter, end_adapter)?;

        let min_overlap = if min_overlap < MIN_OVERLAP_FLOOR {
            warn!(
                requested = min_overlap,
                applied = MIN_OVERLAP_FLOOR,
                "minimum adapter overlap raised to floor"
            );
            MIN_OVERLAP_FLOOR
        } else {
            min_overlap
        };

        Ok(TrimConfig {
            trimmer: trimmer.min_overlap(min_overlap),
        })
    }

    pub fn start_adapter(&self) -> &str {
        self.trimmer.start_adapter()
    }

    pub fn end_adapter(&self) -> &str {
        self.trimmer.end_adapter()
    }

    pub fn min_overlap(&self) -> usize {
        self.trimmer.overlap_threshold()
    }

    pub fn trimmer(&self) -> &AdapterTrimmer {
        &self.trimmer
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    input: PathBuf,
    output_dir: PathBuf,
    quality_encoding: QualityEncoding,
    trim: Option<TrimConfig>,
    parallel: bool,
}

impl AnalyzerConfig {
    pub fn new<P: AsRef<Path>>(input: P) -> Self {
        AnalyzerConfig {
            input: input.as_ref().to_path_buf(),
            output_dir: PathBuf::from("output"),
            quality_encoding: QualityEncoding::default(),
            trim: None,
            parallel: false,
        }
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn quality_encoding(mut self, encoding: QualityEncoding) -> Self {
        self.quality_encoding = encoding;
        self
    }

    pub fn trim(mut self, trim: Option<TrimConfig>) -> Self {
        self.trim = trim;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn encoding(&self) -> QualityEncoding {
        self.quality_encoding
    }

    pub fn trim_config(&self) -> Option<&TrimConfig> {
        self.trim.as_ref()
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn trimmed_output_path(&self) -> PathBuf {
        self.output_dir.join(TRIMMED_OUTPUT_NAME)
    }
}
