//! Reader options.

use std::collections::HashSet;

use jira_config::{DEFAULT_NULL_VALUES, JiraConfig};

use crate::error::IngestError;

/// How cells are split and which cell texts count as null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    pub delimiter: u8,
    pub null_values: HashSet<String>,
}

impl SourceOptions {
    pub fn new(delimiter: u8, null_values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            delimiter,
            null_values: null_values.into_iter().map(Into::into).collect(),
        }
    }

    /// True when `cell` is one of the configured null markers.
    pub fn is_null(&self, cell: &str) -> bool {
        self.null_values.contains(cell)
    }
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self::new(b',', DEFAULT_NULL_VALUES.iter().copied())
    }
}

impl TryFrom<&JiraConfig> for SourceOptions {
    type Error = IngestError;

    fn try_from(config: &JiraConfig) -> Result<Self, Self::Error> {
        let delimiter = u8::try_from(config.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(IngestError::InvalidDelimiter {
                delimiter: config.delimiter,
            })?;
        Ok(Self::new(delimiter, config.null_values.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_null_markers() {
        let options = SourceOptions::default();
        for marker in ["", "NA", "N/A", "NULL", "null", "NaN", "nan", "None"] {
            assert!(options.is_null(marker), "{marker:?}");
        }
        assert!(!options.is_null("none"));
        assert!(!options.is_null(" "));
    }

    #[test]
    fn test_from_config() {
        let config = JiraConfig {
            delimiter: ';',
            null_values: vec!["-".into()],
            ..JiraConfig::default()
        };
        let options = SourceOptions::try_from(&config).unwrap();
        assert_eq!(options.delimiter, b';');
        assert!(options.is_null("-"));
        assert!(!options.is_null(""));
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        for delimiter in ['é', '§', '→'] {
            let config = JiraConfig {
                delimiter,
                ..JiraConfig::default()
            };
            let err = SourceOptions::try_from(&config).unwrap_err();
            assert!(
                matches!(err, IngestError::InvalidDelimiter { delimiter: d } if d == delimiter),
                "{delimiter:?}"
            );
        }
    }
}
