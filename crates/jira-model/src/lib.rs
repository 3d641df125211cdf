//! Data model for issue-tracker records flowing through the audit pipeline.
//!
//! - [`FieldValue`] - a single cell, with absence and null treated alike
//! - [`Record`] - one issue, keyed by column name
//! - [`RecordBatch`] / [`AnnotatedBatch`] - ordered chunks of records before
//!   and after validation

pub mod record;
pub mod value;

pub use record::{
    AnnotatedBatch, AnnotatedRecord, ERROR_COLUMN, ERROR_SEPARATOR, Record, RecordBatch,
    join_errors,
};
pub use value::{FieldValue, parse_timestamp};

/// Well-known field names referenced by the default rule set.
pub mod fields {
    pub const KEY: &str = "key";
    pub const STATUS: &str = "status";
    pub const PRIORITY: &str = "priority";
    pub const TYPE: &str = "type";
    pub const ASSIGNEE_ID: &str = "assignee_id";
    pub const CREATED: &str = "created";
    pub const UPDATED: &str = "updated";
    pub const RESOLVED: &str = "resolved";
}
