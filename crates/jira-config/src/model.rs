//! Typed configuration sections and their defaults.

use serde::{Deserialize, Serialize};

/// Cell contents treated as null when reading source files.
pub const DEFAULT_NULL_VALUES: &[&str] = &["", "NA", "N/A", "NULL", "null", "NaN", "nan", "None"];

/// A configuration value given either as one string or as a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueSet {
    One(String),
    Many(Vec<String>),
}

impl ValueSet {
    /// Iterate over the contained values.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for ValueSet {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<&str>> for ValueSet {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Complete audit configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    pub jira: JiraConfig,
    pub validations: ValidationConfig,
    pub pipelines: PipelineConfig,
}

/// Record source settings (`jira` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Path of the CSV export to validate.
    pub filename: String,
    /// Maximum number of records per batch.
    pub chunk_size: usize,
    /// Field delimiter of the source file.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Cell contents read as null.
    #[serde(default = "default_null_values")]
    pub null_values: Vec<String>,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            filename: "jira_issues.csv".to_string(),
            chunk_size: 1000,
            delimiter: default_delimiter(),
            null_values: default_null_values(),
        }
    }
}

/// Validator parameters (`validations` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Statuses a record may carry, in display order.
    pub valid_statuses: Vec<String>,
    /// Maximum number of days an issue may stay open or take to resolve.
    pub sla_days: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            valid_statuses: ["To Do", "In Progress", "Resolved", "Closed", "Open"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            sla_days: 7,
        }
    }
}

/// Rule selection parameters (`pipelines` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Issue types that must have an assignee.
    pub require_assignee_for_types: ValueSet,
    /// Statuses that must carry a resolved date.
    pub require_resolved_date_for_statuses: ValueSet,
    /// Append the SLA rule to the default rule set.
    #[serde(default)]
    pub enable_sla_check: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            require_assignee_for_types: vec!["Story", "Bug"].into(),
            require_resolved_date_for_statuses: vec!["Resolved", "Closed"].into(),
            enable_sla_check: false,
        }
    }
}

fn default_delimiter() -> char {
    ','
}

fn default_null_values() -> Vec<String> {
    DEFAULT_NULL_VALUES.iter().map(|v| (*v).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_set_accepts_string_or_list() {
        let one: ValueSet = serde_json::from_str(r#""Bug""#).unwrap();
        assert_eq!(one, ValueSet::One("Bug".to_string()));
        let many: ValueSet = serde_json::from_str(r#"["Bug", "Story"]"#).unwrap();
        assert_eq!(many.values().collect::<Vec<_>>(), vec!["Bug", "Story"]);
    }

    #[test]
    fn test_value_set_rejects_other_types() {
        assert!(serde_json::from_str::<ValueSet>("42").is_err());
        assert!(serde_json::from_str::<ValueSet>(r#"[1, 2]"#).is_err());
        assert!(serde_json::from_str::<ValueSet>(r#"{"a": "b"}"#).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.jira.filename, "jira_issues.csv");
        assert_eq!(config.jira.chunk_size, 1000);
        assert_eq!(config.validations.sla_days, 7);
        assert_eq!(config.validations.valid_statuses.len(), 5);
        assert!(!config.pipelines.enable_sla_check);
    }
}
