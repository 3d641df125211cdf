use std::collections::BTreeMap;
use std::path::PathBuf;

use jira_model::AnnotatedBatch;

/// Counts accumulated over one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub batches: usize,
    pub records: usize,
    pub records_with_errors: usize,
    /// Occurrences of each distinct error message.
    pub error_counts: BTreeMap<String, usize>,
}

impl RunSummary {
    pub fn record_batch(&mut self, batch: &AnnotatedBatch) {
        self.batches += 1;
        self.records += batch.len();
        for row in &batch.rows {
            if row.has_errors() {
                self.records_with_errors += 1;
            }
            for error in &row.errors {
                *self.error_counts.entry(error.clone()).or_default() += 1;
            }
        }
    }

    pub fn total_errors(&self) -> usize {
        self.error_counts.values().sum()
    }

    pub fn has_errors(&self) -> bool {
        self.records_with_errors > 0
    }

    /// Messages ordered by descending count, then text.
    pub fn ranked_errors(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .error_counts
            .iter()
            .map(|(message, count)| (message.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

#[derive(Debug)]
pub struct ValidateResult {
    pub config: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub summary: RunSummary,
}
