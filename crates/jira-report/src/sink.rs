//! Output sinks for annotated batches.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use jira_model::AnnotatedBatch;

use crate::error::{ReportError, Result};
use crate::sanitize::sanitize_cell;

/// Accepts annotated batches in source order.
pub trait RecordSink {
    fn write_batch(&mut self, batch: &AnnotatedBatch) -> Result<()>;

    /// Flush buffered output. No further batches may follow.
    fn finish(&mut self) -> Result<()>;
}

/// Writes every batch into one CSV sheet: source columns plus `error`.
///
/// The header is written with the first batch only.
pub struct CsvSheetWriter<W: Write = File> {
    path: PathBuf,
    writer: csv::Writer<W>,
    header_written: bool,
    rows_written: usize,
}

impl CsvSheetWriter<File> {
    /// Create (or truncate) `path`, creating parent directories.
    pub fn create(path: &Path) -> Result<Self> {
        let create_err = |source| ReportError::Create {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(create_err)?;
        }
        let file = File::create(path).map_err(create_err)?;
        Ok(Self::from_writer(file, path))
    }
}

impl<W: Write> CsvSheetWriter<W> {
    /// Wrap any writer; `path` labels errors.
    pub fn from_writer(writer: W, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: csv::WriterBuilder::new().flexible(false).from_writer(writer),
            header_written: false,
            rows_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and return the inner writer.
    pub fn into_inner(self) -> Result<W> {
        let path = self.path;
        self.writer.into_inner().map_err(|err| ReportError::Flush {
            path,
            source: err.into_error(),
        })
    }

    fn write_rows(&mut self, batch: &AnnotatedBatch) -> csv::Result<()> {
        if !self.header_written {
            let header = batch.output_header();
            self.writer
                .write_record(header.iter().map(|name| sanitize_cell(name).into_owned()))?;
            self.header_written = true;
        }
        let mut cells: Vec<String> = Vec::with_capacity(batch.columns.len() + 1);
        for row in &batch.rows {
            cells.clear();
            cells.extend(
                batch
                    .columns
                    .iter()
                    .map(|column| sanitize_cell(&row.record.get(column).to_cell_text()).into_owned()),
            );
            cells.push(sanitize_cell(&row.error_cell()).into_owned());
            self.writer.write_record(&cells)?;
            self.rows_written += 1;
        }
        self.writer.flush().map_err(csv::Error::from)
    }
}

impl<W: Write> RecordSink for CsvSheetWriter<W> {
    fn write_batch(&mut self, batch: &AnnotatedBatch) -> Result<()> {
        self.write_rows(batch).map_err(|source| ReportError::WriteBatch {
            path: self.path.clone(),
            batch_index: batch.index,
            first_row: batch.first_row,
            source,
        })?;
        tracing::debug!(
            batch = batch.index,
            rows = batch.len(),
            total = self.rows_written,
            "wrote batch"
        );
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| ReportError::Flush {
            path: self.path.clone(),
            source,
        })
    }
}
