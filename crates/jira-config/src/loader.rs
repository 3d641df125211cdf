//! Loading, validating, and bootstrapping the configuration file.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::model::{AuditConfig, JiraConfig, PipelineConfig, ValidationConfig};

/// Configuration file used when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Keys that must be present in every configuration, in dotted form.
pub const REQUIRED_KEYS: &[&str] = &[
    "jira.filename",
    "jira.chunk_size",
    "validations.valid_statuses",
    "validations.sla_days",
    "pipelines.require_assignee_for_types",
    "pipelines.require_resolved_date_for_statuses",
];

/// Load the configuration at `path`, writing the default mapping first if
/// the file does not exist.
pub fn load_or_init(path: &Path) -> Result<AuditConfig> {
    if !path.exists() {
        let config = AuditConfig::default();
        save(path, &config)?;
        tracing::info!(path = %path.display(), "initialized default configuration");
        return Ok(config);
    }
    load(path)
}

/// Load and validate the configuration at `path`.
pub fn load(path: &Path) -> Result<AuditConfig> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let config = from_value(&value)?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Persist `config` as pretty-printed JSON, creating parent directories.
pub fn save(path: &Path, config: &AuditConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut content = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigError::invalid("<root>", e.to_string()))?;
    content.push('\n');
    fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse configuration from a JSON string.
pub fn from_json_str(content: &str) -> Result<AuditConfig> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| ConfigError::invalid("<root>", e.to_string()))?;
    from_value(&value)
}

/// Build a configuration from a parsed JSON mapping.
///
/// Required keys are checked first so a missing key is reported by name
/// rather than as a generic deserialization failure.
pub fn from_value(value: &Value) -> Result<AuditConfig> {
    for key in REQUIRED_KEYS {
        if lookup(value, key).is_none() {
            return Err(ConfigError::MissingKey { key: *key });
        }
    }

    let config = AuditConfig {
        jira: section::<JiraConfig>(value, "jira")?,
        validations: section::<ValidationConfig>(value, "validations")?,
        pipelines: section::<PipelineConfig>(value, "pipelines")?,
    };
    check(&config)?;
    Ok(config)
}

fn lookup<'a>(value: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .try_fold(value, |node, part| node.as_object()?.get(part))
}

fn section<T: DeserializeOwned>(value: &Value, name: &str) -> Result<T> {
    let node = lookup(value, name).cloned().unwrap_or(Value::Null);
    serde_json::from_value(node).map_err(|e| ConfigError::invalid(name, e.to_string()))
}

fn check(config: &AuditConfig) -> Result<()> {
    if config.jira.chunk_size == 0 {
        return Err(ConfigError::invalid("jira.chunk_size", "must be at least 1"));
    }
    if config.jira.filename.trim().is_empty() {
        return Err(ConfigError::invalid("jira.filename", "must not be empty"));
    }
    if !config.jira.delimiter.is_ascii() {
        return Err(ConfigError::invalid(
            "jira.delimiter",
            format!("'{}' is not an ASCII character", config.jira.delimiter),
        ));
    }
    Ok(())
}
