//! Issue export ingestion.
//!
//! [`RecordSource`] streams a CSV export as [`jira_model::RecordBatch`]es of
//! bounded size. Cells matching a null marker become
//! [`jira_model::FieldValue::Null`]; every other cell is kept as text.

mod error;
mod options;
mod source;

pub use error::{IngestError, Result};
pub use options::SourceOptions;
pub use source::RecordSource;
