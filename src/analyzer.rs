use crate::{
    collection::RecordCollection,
    config::AnalyzerConfig,
    error::Result,
    reader::FastqReader,
    stats::Report,
    writer::FastqWriter,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub input_reads: usize,
    pub report: Report,
    /// Set when adapters were trimmed and the trimmed reads were written out.
    pub trimmed_output: Option<PathBuf>,
}

/// Parse, optionally trim, then compute statistics for one input file.
///
/// Output is only written once parsing, trimming and statistics have succeeded.
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Analyzer { config }
    }

    pub fn run(&self) -> Result<AnalysisOutcome> {
        let span = info_span!("analyze", input = %self.config.input().display());
        let _guard = span.enter();

        let records = FastqReader::from_path(self.config.input(), self.config.encoding())?
            .read_collection()?;
        info!(records = records.len(), encoding = %self.config.encoding(), "parsed input");

        self.analyze(records)
    }

    /// Runs the trim/statistics/write stages on an already parsed collection.
    pub fn analyze(&self, records: RecordCollection) -> Result<AnalysisOutcome> {
        let input_reads = records.len();

        let Some(trim) = self.config.trim_config() else {
            let report = records.report()?;
            return Ok(AnalysisOutcome {
                input_reads,
                report,
                trimmed_output: None,
            });
        };

        let trimmed = if self.config.is_parallel() {
            records.par_cut(trim.trimmer())
        } else {
            records.cut(trim.trimmer())
        };
        let report = trimmed.report()?;
        info!(
            cut_records = report.summary.cut_records,
            total_cuts = report.summary.total_cuts,
            "trimmed adapters"
        );

        let path = self.config.trimmed_output_path();
        self.write_trimmed(&trimmed, &path)?;

        Ok(AnalysisOutcome {
            input_reads,
            report,
            trimmed_output: Some(path),
        })
    }

    fn write_trimmed(&self, records: &RecordCollection, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let result = FastqWriter::to_file(path, self.config.encoding()).and_then(|mut writer| {
            writer.write_all_records(records)?;
            writer.finish()
        });

        match result {
            Ok(()) => {
                debug!(path = %path.display(), records = records.len(), "wrote trimmed reads");
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "removing incomplete output");
                let _ = fs::remove_file(path);
                Err(err)
            }
        }
    }
}
