//! Configuration for the issue audit.
//!
//! The configuration is a nested JSON mapping with three sections:
//!
//! ```json
//! {
//!   "jira":        { "filename": "jira_issues.csv", "chunk_size": 1000 },
//!   "validations": { "valid_statuses": ["Open", "Closed"], "sla_days": 7 },
//!   "pipelines":   { "require_assignee_for_types": ["Story", "Bug"],
//!                    "require_resolved_date_for_statuses": ["Resolved", "Closed"] }
//! }
//! ```
//!
//! Values are loaded once per run and passed explicitly to the rule builder.
//! There is no process-wide cached copy.

mod error;
mod loader;
mod model;

pub use error::{ConfigError, Result};
pub use loader::{
    DEFAULT_CONFIG_FILE, REQUIRED_KEYS, from_json_str, from_value, load, load_or_init, save,
};
pub use model::{
    AuditConfig, DEFAULT_NULL_VALUES, JiraConfig, PipelineConfig, ValidationConfig, ValueSet,
};
