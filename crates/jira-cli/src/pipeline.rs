//! Validation run: source -> runner -> sink.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use jira_config::JiraConfig;
use jira_ingest::{IngestError, RecordSource, SourceOptions};
use jira_report::{CsvSheetWriter, RecordSink};
use jira_rules::{Runner, TracingObserver};

use crate::types::RunSummary;

/// Default artifact name when no `--output` is given.
pub const DEFAULT_OUTPUT_FILE: &str = "jira_issues_validated.csv";

/// Where to read, where to write, and how to chunk.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub chunk_size: usize,
    pub source: SourceOptions,
}

impl RunPlan {
    pub fn from_config(
        config: &JiraConfig,
        output: impl Into<PathBuf>,
    ) -> std::result::Result<Self, IngestError> {
        Ok(Self {
            input: PathBuf::from(&config.filename),
            output: output.into(),
            chunk_size: config.chunk_size,
            source: SourceOptions::try_from(config)?,
        })
    }
}

/// Stream every batch of `plan.input` through `runner` into `plan.output`.
///
/// The input is opened before the output is created, so a missing input
/// leaves no artifact behind.
pub fn run(runner: &Runner, plan: &RunPlan) -> Result<RunSummary> {
    let span = info_span!(
        "run",
        input = %plan.input.display(),
        output = %plan.output.display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let source = RecordSource::open(&plan.input, plan.chunk_size, &plan.source)
        .with_context(|| format!("open input {}", plan.input.display()))?;
    let mut sink = CsvSheetWriter::create(&plan.output)
        .with_context(|| format!("create output {}", plan.output.display()))?;

    let mut summary = RunSummary::default();
    let mut observer = TracingObserver;
    for batch in source {
        let batch = batch.context("read input batch")?;
        let batch_span = info_span!("batch", index = batch.index);
        let _batch_guard = batch_span.enter();

        let annotated = runner.annotate_with(batch, &mut observer);
        summary.record_batch(&annotated);
        sink.write_batch(&annotated).context("write output batch")?;
        debug!(
            first_row = annotated.first_row,
            rows = annotated.len(),
            "batch validated"
        );
    }
    sink.finish().context("flush output")?;

    if summary.records == 0 {
        warn!(input = %plan.input.display(), "input has no records");
    }
    info!(
        batches = summary.batches,
        records = summary.records,
        records_with_errors = summary.records_with_errors,
        errors = summary.total_errors(),
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );
    Ok(summary)
}
