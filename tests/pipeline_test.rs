use fastq_analyzer::{
    config::TRIMMED_OUTPUT_NAME, Analyzer, AnalyzerConfig, FastqError, FastqReader,
    QualityEncoding, TrimConfig,
};
use std::fs;
use std::path::Path;

const SAMPLE: &str = "@read1\nACGTACGTGGGGCC\n+\nIIIIIIIIIIIIII\n\
@read2\nTTTTGGGGAGATC\n+\nIIIIIIIIIIIII\n\
@read3\nCCCCAAAA\n+\n55555555\n";

fn write_input(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_analysis_without_trimming() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "sample.fastq", SAMPLE);
    let output_dir = dir.path().join("out");

    let config = AnalyzerConfig::new(&input).output_dir(&output_dir);
    let outcome = Analyzer::new(config).run().unwrap();

    assert_eq!(outcome.input_reads, 3);
    assert_eq!(outcome.report.summary.total_reads, 3);
    assert_eq!(outcome.report.summary.total_cuts, 0);
    assert!(outcome.trimmed_output.is_none());
    assert!(!output_dir.exists());
}

#[test]
fn test_analysis_with_trimming_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "sample.fastq", SAMPLE);
    let output_dir = dir.path().join("out");

    let trim = TrimConfig::new("ACGTACGT", "AGATCGGAAG", 3).unwrap();
    let config = AnalyzerConfig::new(&input)
        .output_dir(&output_dir)
        .trim(Some(trim));
    let outcome = Analyzer::new(config).run().unwrap();

    let summary = &outcome.report.summary;
    assert_eq!(summary.total_reads, 3);
    assert_eq!(summary.cut_records, 2);
    assert_eq!(summary.total_cuts, 2);

    let path = outcome.trimmed_output.expect("trimmed output path");
    assert_eq!(path, output_dir.join(TRIMMED_OUTPUT_NAME));

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "@read1\nGGGGCC\n+\nIIIIII\n@read2\nTTTTGGGG\n+\nIIIIIIII\n@read3\nCCCCAAAA\n+\n55555555\n"
    );

    let reread = FastqReader::from_path(&path, QualityEncoding::Phred33)
        .unwrap()
        .read_collection()
        .unwrap();
    assert_eq!(reread.len(), 3);
}

#[test]
fn test_parallel_trimming_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "sample.fastq", SAMPLE);
    let trim = TrimConfig::new("ACGTACGT", "AGATCGGAAG", 3).unwrap();

    let sequential = Analyzer::new(
        AnalyzerConfig::new(&input)
            .output_dir(dir.path().join("seq"))
            .trim(Some(trim.clone())),
    )
    .run()
    .unwrap();
    let parallel = Analyzer::new(
        AnalyzerConfig::new(&input)
            .output_dir(dir.path().join("par"))
            .trim(Some(trim))
            .parallel(true),
    )
    .run()
    .unwrap();

    assert_eq!(sequential.report, parallel.report);
}

#[test]
fn test_malformed_input_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "broken.fastq", "@read1\nACGT\n+\nIIII\n@read2\nACGT\n");
    let output_dir = dir.path().join("out");

    let trim = TrimConfig::new("ACGT", "ACGT", 3).unwrap();
    let config = AnalyzerConfig::new(&input)
        .output_dir(&output_dir)
        .trim(Some(trim));
    let err = Analyzer::new(config).run().unwrap_err();

    assert!(err.is_format_error());
    assert!(!output_dir.join(TRIMMED_OUTPUT_NAME).exists());
}

#[test]
fn test_empty_input_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "empty.fastq", "");
    let output_dir = dir.path().join("out");

    let trim = TrimConfig::new("ACGT", "ACGT", 3).unwrap();
    let config = AnalyzerConfig::new(&input)
        .output_dir(&output_dir)
        .trim(Some(trim));

    assert!(matches!(
        Analyzer::new(config).run(),
        Err(FastqError::EmptyCollection)
    ));
    assert!(!output_dir.exists());
}

#[test]
fn test_invalid_adapter_rejected() {
    assert!(matches!(
        TrimConfig::new("ACGU", "ACGT", 3),
        Err(FastqError::InvalidAdapter { .. })
    ));
}
