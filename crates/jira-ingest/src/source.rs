//! Chunked CSV record source.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jira_model::{FieldValue, Record, RecordBatch};

use crate::error::{IngestError, Result};
use crate::options::SourceOptions;

const UTF8_BOM: char = '\u{feff}';

/// Lazy, finite sequence of record batches read in file order.
///
/// Each batch holds at most `chunk_size` records. A file with a header and no
/// rows yields a single empty batch so downstream sinks still see the columns.
/// After the first error the source is exhausted.
pub struct RecordSource<R: Read = File> {
    path: PathBuf,
    reader: csv::Reader<R>,
    columns: Arc<[String]>,
    chunk_size: usize,
    options: SourceOptions,
    next_index: usize,
    rows_read: usize,
    finished: bool,
}

impl RecordSource<File> {
    /// Open `path` and read its header row.
    pub fn open(path: &Path, chunk_size: usize, options: &SourceOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::from_reader(file, path, chunk_size, options)
    }
}

impl<R: Read> RecordSource<R> {
    /// Read from any byte stream; `path` labels errors and logs.
    pub fn from_reader(
        input: R,
        path: impl Into<PathBuf>,
        chunk_size: usize,
        options: &SourceOptions,
    ) -> Result<Self> {
        let path = path.into();
        if chunk_size == 0 {
            return Err(IngestError::InvalidChunkSize { chunk_size });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(options.delimiter)
            .flexible(false)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|e| map_csv_error(&path, e))?
            .clone();
        let columns = parse_header(&path, &headers)?;

        tracing::debug!(
            path = %path.display(),
            columns = columns.len(),
            chunk_size,
            "opened record source"
        );

        Ok(Self {
            path,
            reader,
            columns,
            chunk_size,
            options: options.clone(),
            next_index: 0,
            rows_read: 0,
            finished: false,
        })
    }

    /// Source columns in file order.
    pub fn columns(&self) -> &Arc<[String]> {
        &self.columns
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows yielded so far.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    fn read_batch(&mut self) -> Result<Vec<Record>> {
        let mut records = Vec::with_capacity(self.chunk_size.min(4096));
        let mut row = csv::StringRecord::new();
        while records.len() < self.chunk_size {
            let more = self
                .reader
                .read_record(&mut row)
                .map_err(|e| map_csv_error(&self.path, e))?;
            if !more {
                self.finished = true;
                break;
            }
            records.push(self.to_record(&row));
        }
        Ok(records)
    }

    fn to_record(&self, row: &csv::StringRecord) -> Record {
        self.columns
            .iter()
            .zip(row.iter())
            .map(|(column, cell)| {
                let value = if self.options.is_null(cell) {
                    FieldValue::Null
                } else {
                    FieldValue::Text(cell.to_string())
                };
                (column.as_str(), value)
            })
            .collect()
    }
}

impl<R: Read> Iterator for RecordSource<R> {
    type Item = Result<RecordBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let records = match self.read_batch() {
            Ok(records) => records,
            Err(err) => {
                self.finished = true;
                return Some(Err(err));
            }
        };
        if records.is_empty() && self.next_index > 0 {
            return None;
        }

        let batch = RecordBatch {
            index: self.next_index,
            first_row: self.rows_read,
            columns: Arc::clone(&self.columns),
            records,
        };
        self.next_index += 1;
        self.rows_read += batch.len();
        tracing::debug!(
            batch = batch.index,
            first_row = batch.first_row,
            rows = batch.len(),
            "read batch"
        );
        Some(Ok(batch))
    }
}

impl<R: Read> FusedIterator for RecordSource<R> {}

fn parse_header(path: &Path, headers: &csv::StringRecord) -> Result<Arc<[String]>> {
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == 0 {
                name.trim_start_matches(UTF8_BOM).to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    if columns.is_empty() || columns.iter().all(|c| c.trim().is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut seen = HashSet::with_capacity(columns.len());
    for column in &columns {
        if !seen.insert(column.as_str()) {
            return Err(IngestError::DuplicateColumn {
                path: path.to_path_buf(),
                column: column.clone(),
            });
        }
    }
    Ok(columns.into())
}

fn map_csv_error(path: &Path, err: csv::Error) -> IngestError {
    let path = path.to_path_buf();
    if err.is_io_error() {
        return IngestError::FileRead {
            path,
            source: std::io::Error::from(err),
        };
    }
    let malformed = matches!(
        err.kind(),
        csv::ErrorKind::UnequalLengths { .. } | csv::ErrorKind::Utf8 { .. }
    );
    if malformed {
        return IngestError::MalformedRow {
            path,
            line: err.position().map_or(0, csv::Position::line),
            message: err.to_string(),
        };
    }
    IngestError::Csv { path, source: err }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn source(data: &str, chunk_size: usize) -> Result<RecordSource<Cursor<Vec<u8>>>> {
        RecordSource::from_reader(
            Cursor::new(data.as_bytes().to_vec()),
            "issues.csv",
            chunk_size,
            &SourceOptions::default(),
        )
    }

    #[test]
    fn test_batches_respect_chunk_size() {
        let data = "key,status\nJ-1,Open\nJ-2,Open\nJ-3,Closed\nJ-4,Open\nJ-5,Open\n";
        let batches: Vec<RecordBatch> = source(data, 2).unwrap().map(Result::unwrap).collect();
        let sizes: Vec<usize> = batches.iter().map(RecordBatch::len).collect();
        assert_eq!(sizes, [2, 2, 1]);
        let firsts: Vec<usize> = batches.iter().map(|b| b.first_row).collect();
        assert_eq!(firsts, [0, 2, 4]);
        assert_eq!(batches[2].records[0].key(), "J-5");
        assert_eq!(batches[1].index, 1);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_batch() {
        let data = "key\nJ-1\nJ-2\n";
        let src = source(data, 2).unwrap();
        assert_eq!(src.count(), 1);
    }

    #[test]
    fn test_null_markers_become_null() {
        let data = "key,assignee_id,resolved,priority\nJ-1,,NULL,High\n";
        let batch = source(data, 10).unwrap().next().unwrap().unwrap();
        let record = &batch.records[0];
        assert!(record.is_null("assignee_id"));
        assert!(record.is_null("resolved"));
        assert_eq!(record.get("priority"), &FieldValue::from("High"));
    }

    #[test]
    fn test_bom_is_stripped() {
        let data = "\u{feff}key,status\nJ-1,Open\n";
        let src = source(data, 10).unwrap();
        assert_eq!(src.columns().to_vec(), ["key", "status"]);
    }

    #[test]
    fn test_header_only_yields_one_empty_batch() {
        let mut src = source("key,status\n", 10).unwrap();
        let batch = src.next().unwrap().unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.columns.len(), 2);
        assert!(src.next().is_none());
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let data = "key,status\nJ-1,Open\nJ-2\nJ-3,Open\n";
        let mut src = source(data, 10).unwrap();
        let err = src.next().unwrap().unwrap_err();
        assert!(matches!(err, IngestError::MalformedRow { line: 3, .. }), "{err}");
        assert!(src.next().is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(source("", 10), Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_duplicate_column() {
        assert!(matches!(
            source("key,key\n1,2\n", 10),
            Err(IngestError::DuplicateColumn { column, .. }) if column == "key"
        ));
    }

    #[test]
    fn test_zero_chunk_size() {
        assert!(matches!(
            source("key\n", 0),
            Err(IngestError::InvalidChunkSize { chunk_size: 0 })
        ));
    }

    #[test]
    fn test_custom_delimiter() {
        let options = SourceOptions::new(b';', ["-"]);
        let mut src =
            RecordSource::from_reader(Cursor::new("key;status\nJ-1;-\n"), "x.csv", 5, &options)
                .unwrap();
        let batch = src.next().unwrap().unwrap();
        assert!(batch.records[0].is_null("status"));
    }
}
