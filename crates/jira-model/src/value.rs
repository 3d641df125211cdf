//! Cell values and timestamp parsing.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats accepted for textual timestamps, tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Offset-carrying formats outside RFC 3339, such as JIRA's own
/// `2018-05-10T14:34:56.000+0000`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest magnitude below which every integral `f64` is exact (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single field of a record.
///
/// Values read from a source file are [`FieldValue::Text`] or
/// [`FieldValue::Null`]; typed variants exist for records built in code.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Absent or explicitly null. A missing field reads as this variant.
    #[default]
    Null,
    Text(String),
    Number(f64),
    Timestamp(NaiveDateTime),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text of a [`FieldValue::Text`]; other variants yield `None`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Interpret the value as a timestamp.
    ///
    /// Text is parsed with [`parse_timestamp`]; null, numbers and
    /// unparseable text yield `None`.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            Self::Text(text) => parse_timestamp(text),
            Self::Null | Self::Number(_) => None,
        }
    }

    /// Render the value for a spreadsheet cell. Null renders as an empty string.
    pub fn to_cell_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Parse a textual timestamp.
///
/// Accepts RFC 3339 and `+hhmm` offsets (both converted to UTC-naive),
/// `YYYY-MM-DD HH:MM[:SS[.fff]]` with a space or `T` separator, and bare
/// `YYYY-MM-DD` dates (midnight).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.naive_utc());
    }
    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(trimmed, format) {
            return Some(ts.naive_utc());
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(parse_timestamp("2024-01-10"), Some(ts("2024-01-10 00:00:00")));
    }

    #[test]
    fn test_parse_datetime_variants() {
        assert_eq!(
            parse_timestamp("2024-01-10 08:30:15"),
            Some(ts("2024-01-10 08:30:15"))
        );
        assert_eq!(
            parse_timestamp("2024-01-10T08:30:15.250"),
            Some(ts("2024-01-10 08:30:15") + chrono::Duration::milliseconds(250))
        );
        assert_eq!(
            parse_timestamp("2024-01-10 08:30"),
            Some(ts("2024-01-10 08:30:00"))
        );
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        assert_eq!(
            parse_timestamp("2024-01-10T08:30:00+02:00"),
            Some(ts("2024-01-10 06:30:00"))
        );
    }

    #[test]
    fn test_parse_jira_export_offsets() {
        assert_eq!(
            parse_timestamp("2018-05-10T14:34:56.000+0000"),
            Some(ts("2018-05-10 14:34:56"))
        );
        assert_eq!(
            parse_timestamp("2018-05-10T14:34:56.000+0200"),
            Some(ts("2018-05-10 12:34:56"))
        );
        assert_eq!(
            parse_timestamp("2018-05-10 14:34:56-0130"),
            Some(ts("2018-05-10 16:04:56"))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("10/01/2024"), None);
    }

    #[test]
    fn test_as_timestamp_by_variant() {
        assert_eq!(FieldValue::Null.as_timestamp(), None);
        assert_eq!(FieldValue::Number(3.0).as_timestamp(), None);
        assert_eq!(
            FieldValue::from("2024-01-10").as_timestamp(),
            Some(ts("2024-01-10 00:00:00"))
        );
        let stamp = ts("2023-05-01 12:00:00");
        assert_eq!(FieldValue::Timestamp(stamp).as_timestamp(), Some(stamp));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(FieldValue::Null.to_cell_text(), "");
        assert_eq!(FieldValue::from("Bug").to_cell_text(), "Bug");
        assert_eq!(FieldValue::Number(42.0).to_cell_text(), "42");
        assert_eq!(FieldValue::Number(1.5).to_cell_text(), "1.5");
        assert_eq!(FieldValue::Number(-3.0).to_cell_text(), "-3");
        assert_eq!(
            FieldValue::Number(1e20).to_cell_text(),
            "100000000000000000000"
        );
        assert_eq!(
            FieldValue::Timestamp(ts("2024-01-10 08:30:15")).to_cell_text(),
            "2024-01-10 08:30:15"
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::from("x"));
    }
}
