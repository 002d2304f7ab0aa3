use anyhow::{Context, Result};
use clap::Parser;
use fastq_analyzer::{AdapterSettings, AdapterSource, Analyzer, AnalyzerConfig, QualityEncoding};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Read statistics and adapter trimming for FASTQ files.
#[derive(Parser, Debug)]
#[command(name = "fastq-analyzer", version, about)]
struct Cli {
    /// Input FASTQ file (.fastq or .fastq.gz)
    input: PathBuf,

    /// Quality score encoding of the input
    #[arg(short = 'q', long = "quality-type", default_value = "Phred+33")]
    quality_type: QualityEncoding,

    /// Trim adapters, requiring overlaps longer than MIN_OVERLAP (raised to at least 3)
    #[arg(short = 'r', long = "remove-adapters", value_name = "MIN_OVERLAP")]
    remove_adapters: Option<usize>,

    /// Adapter used for both ends unless overridden
    #[arg(short = 'a', long, conflicts_with = "adapter_file")]
    adapter: Option<String>,

    #[arg(long, conflicts_with = "start_adapter_file")]
    start_adapter: Option<String>,

    #[arg(long, conflicts_with = "end_adapter_file")]
    end_adapter: Option<String>,

    /// File holding the shared adapter sequence
    #[arg(long)]
    adapter_file: Option<PathBuf>,

    #[arg(long)]
    start_adapter_file: Option<PathBuf>,

    #[arg(long)]
    end_adapter_file: Option<PathBuf>,

    /// Directory receiving the trimmed FASTQ file
    #[arg(short = 'o', long, default_value = "output")]
    output_dir: PathBuf,

    /// Trim reads on all cores
    #[arg(long)]
    parallel: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn source(sequence: Option<String>, file: Option<PathBuf>) -> Option<AdapterSource> {
    sequence
        .map(AdapterSource::Sequence)
        .or(file.map(AdapterSource::File))
}

impl Cli {
    fn into_config(self) -> Result<AnalyzerConfig> {
        let trim = match self.remove_adapters {
            Some(min_overlap) => {
                let settings = AdapterSettings {
                    shared: source(self.adapter, self.adapter_file),
                    start: source(self.start_adapter, self.start_adapter_file),
                    end: source(self.end_adapter, self.end_adapter_file),
                    min_overlap,
                };
                Some(settings.resolve().context("invalid adapter configuration")?)
            }
            None => None,
        };

        Ok(AnalyzerConfig::new(self.input)
            .output_dir(self.output_dir)
            .quality_encoding(self.quality_type)
            .trim(trim)
            .parallel(self.parallel))
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    let config = cli.into_config()?;
    let input = config.input().to_path_buf();

    let start = Instant::now();
    let outcome = Analyzer::new(config)
        .run()
        .with_context(|| format!("failed to analyze {}", input.display()))?;
    info!(elapsed_secs = start.elapsed().as_secs_f64(), "analysis finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        println!("File: {}", input.display());
        println!("{}", outcome.report.summary);
        if let Some(path) = &outcome.trimmed_output {
            println!("\nTrimmed reads written to {}", path.display());
        }
    }

    Ok(())
}
