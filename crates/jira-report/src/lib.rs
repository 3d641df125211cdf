//! Annotated record output.
//!
//! [`CsvSheetWriter`] appends [`jira_model::AnnotatedBatch`]es to a single
//! spreadsheet-compatible CSV file, writing the header once and stripping
//! control characters from every cell.

mod error;
mod sanitize;
mod sink;

pub use error::{ReportError, Result};
pub use sanitize::{is_forbidden, sanitize_cell};
pub use sink::{CsvSheetWriter, RecordSink};
