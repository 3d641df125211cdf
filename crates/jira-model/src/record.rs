//! Records and record batches.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::fields;
use crate::value::FieldValue;

/// Name of the column appended to the output artifact.
pub const ERROR_COLUMN: &str = "error";

/// Separator used to join a record's errors into one cell.
pub const ERROR_SEPARATOR: &str = "; ";

static NULL: FieldValue = FieldValue::Null;

/// One issue-tracker entry.
///
/// Lookups of absent fields return [`FieldValue::Null`], so callers never
/// need to distinguish "missing" from "null".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Value of `field`, or [`FieldValue::Null`] when absent.
    pub fn get(&self, field: &str) -> &FieldValue {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Whether the field is absent or null.
    pub fn is_null(&self, field: &str) -> bool {
        self.get(field).is_null()
    }

    /// Issue key for diagnostics, `"N/A"` when unavailable.
    pub fn key(&self) -> String {
        match self.get(fields::KEY) {
            FieldValue::Null => "N/A".to_string(),
            value => value.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// An ordered chunk of records read from a source.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    /// Zero-based position of this batch in the stream.
    pub index: usize,
    /// Zero-based row number (excluding the header) of the first record.
    pub first_row: usize,
    /// Source columns in source order, shared by every batch of a stream.
    pub columns: Arc<[String]>,
    pub records: Vec<Record>,
}

impl RecordBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A record together with the errors found for it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRecord {
    pub record: Record,
    pub errors: Vec<String>,
}

impl AnnotatedRecord {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Content of the output `error` cell.
    pub fn error_cell(&self) -> String {
        join_errors(&self.errors)
    }
}

/// A batch after validation, ready for a sink.
#[derive(Debug, Clone)]
pub struct AnnotatedBatch {
    pub index: usize,
    pub first_row: usize,
    pub columns: Arc<[String]>,
    pub rows: Vec<AnnotatedRecord>,
}

impl AnnotatedBatch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Output header: source columns followed by [`ERROR_COLUMN`].
    pub fn output_header(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(ERROR_COLUMN))
            .collect()
    }
}

/// Join error messages with [`ERROR_SEPARATOR`]; empty input yields `""`.
pub fn join_errors(errors: &[String]) -> String {
    errors.join(ERROR_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_reads_as_null() {
        let record = Record::new().with("status", "Open");
        assert_eq!(record.get("status"), &FieldValue::from("Open"));
        assert!(record.get("priority").is_null());
        assert!(record.is_null("priority"));
    }

    #[test]
    fn test_explicit_null_equals_absent() {
        let explicit = Record::new().with("resolved", FieldValue::Null);
        let absent = Record::new();
        assert_eq!(explicit.get("resolved"), absent.get("resolved"));
    }

    #[test]
    fn test_key_fallback() {
        assert_eq!(Record::new().key(), "N/A");
        assert_eq!(Record::new().with("key", "PROJ-7").key(), "PROJ-7");
    }

    #[test]
    fn test_from_iter() {
        let record: Record = [("type", "Bug"), ("status", "Open")].into_iter().collect();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("type").as_text(), Some("Bug"));
    }

    #[test]
    fn test_join_errors() {
        assert_eq!(join_errors(&[]), "");
        assert_eq!(
            join_errors(&["a".to_string(), "b".to_string()]),
            "a; b"
        );
    }

    #[test]
    fn test_output_header_appends_error_column() {
        let batch = AnnotatedBatch {
            index: 0,
            first_row: 0,
            columns: vec!["key".to_string(), "status".to_string()].into(),
            rows: Vec::new(),
        };
        assert_eq!(batch.output_header(), vec!["key", "status", "error"]);
    }
}
