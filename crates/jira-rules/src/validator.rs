//! Validators: checks producing an error message or nothing.

use std::fmt;

use chrono::{Local, NaiveDateTime};
use jira_model::{FieldValue, Record, fields};

use crate::predicate::quoted_list;

pub const ASSIGNEE_EMPTY: &str = "Assignee must be a non-empty string.";
pub const RESOLVED_NULL: &str = "Resolved date must not be null.";
pub const PRIORITY_NULL: &str = "Priority must not be null.";
pub const DATES_NULL: &str = "Created and updated dates must not be null.";
pub const DATES_UNPARSEABLE: &str = "Created and updated dates must be valid timestamps.";
pub const UPDATED_BEFORE_CREATED: &str = "Updated date must be after created date.";
pub const CREATED_NULL: &str = "Created date must not be null.";
pub const CREATED_UNPARSEABLE: &str = "Created date must be a valid timestamp.";
pub const RESOLVED_UNPARSEABLE: &str = "Resolved date must be a valid timestamp.";

const SECONDS_PER_DAY: i64 = 86_400;

/// Evaluation-time inputs shared by every validator of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalContext {
    /// Instant treated as "now" for open-issue durations.
    pub now: NaiveDateTime,
}

impl EvalContext {
    /// Context pinned to the current local time.
    pub fn current() -> Self {
        Self {
            now: Local::now().naive_local(),
        }
    }

    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::current()
    }
}

/// A check over one record. Parameters are bound when the rule set is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    AssigneeNotEmpty,
    ResolvedDateNotNull,
    PriorityNotNull,
    UpdatedAfterCreated,
    StatusIsValid { valid_statuses: Vec<String> },
    WithinSla { sla_days: i64 },
}

impl Validator {
    pub fn status_is_valid<I, S>(valid_statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StatusIsValid {
            valid_statuses: valid_statuses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn within_sla(sla_days: i64) -> Self {
        Self::WithinSla { sla_days }
    }

    /// Stable identifier used in logs and rule listings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AssigneeNotEmpty => "assignee_not_empty",
            Self::ResolvedDateNotNull => "resolved_date_not_null",
            Self::PriorityNotNull => "priority_not_null",
            Self::UpdatedAfterCreated => "updated_after_created",
            Self::StatusIsValid { .. } => "status_is_valid",
            Self::WithinSla { .. } => "within_sla",
        }
    }

    /// Return an error message when `record` violates this check.
    pub fn check(&self, record: &Record, ctx: &EvalContext) -> Option<String> {
        match self {
            Self::AssigneeNotEmpty => check_assignee(record),
            Self::ResolvedDateNotNull => {
                record.is_null(fields::RESOLVED).then(|| RESOLVED_NULL.to_string())
            }
            Self::PriorityNotNull => {
                record.is_null(fields::PRIORITY).then(|| PRIORITY_NULL.to_string())
            }
            Self::UpdatedAfterCreated => check_updated_after_created(record),
            Self::StatusIsValid { valid_statuses } => check_status(record, valid_statuses),
            Self::WithinSla { sla_days } => check_sla(record, *sla_days, ctx.now),
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusIsValid { valid_statuses } => {
                write!(f, "{}({})", self.name(), quoted_list(valid_statuses))
            }
            Self::WithinSla { sla_days } => write!(f, "{}({sla_days})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

fn check_assignee(record: &Record) -> Option<String> {
    let assigned = record
        .get(fields::ASSIGNEE_ID)
        .as_text()
        .is_some_and(|text| !text.trim().is_empty());
    (!assigned).then(|| ASSIGNEE_EMPTY.to_string())
}

fn check_updated_after_created(record: &Record) -> Option<String> {
    let created = record.get(fields::CREATED);
    let updated = record.get(fields::UPDATED);
    if created.is_null() || updated.is_null() {
        return Some(DATES_NULL.to_string());
    }
    let (Some(created), Some(updated)) = (created.as_timestamp(), updated.as_timestamp()) else {
        return Some(DATES_UNPARSEABLE.to_string());
    };
    (updated < created).then(|| UPDATED_BEFORE_CREATED.to_string())
}

fn check_status(record: &Record, valid_statuses: &[String]) -> Option<String> {
    let status = record.get(fields::STATUS);
    let valid = status
        .as_text()
        .is_some_and(|text| valid_statuses.iter().any(|s| s == text));
    if valid {
        return None;
    }
    Some(format!(
        "Status '{}' is not valid. Must be one of {}.",
        status.to_cell_text(),
        quoted_list(valid_statuses)
    ))
}

fn check_sla(record: &Record, sla_days: i64, now: NaiveDateTime) -> Option<String> {
    let created = record.get(fields::CREATED);
    if created.is_null() {
        return Some(CREATED_NULL.to_string());
    }
    let Some(created) = created.as_timestamp() else {
        return Some(CREATED_UNPARSEABLE.to_string());
    };

    let resolved = record.get(fields::RESOLVED);
    let (end, is_resolved) = match resolved {
        FieldValue::Null => (now, false),
        value => match value.as_timestamp() {
            Some(ts) => (ts, true),
            None => return Some(RESOLVED_UNPARSEABLE.to_string()),
        },
    };

    let elapsed_days = (end - created).num_seconds().div_euclid(SECONDS_PER_DAY);
    if elapsed_days <= sla_days {
        return None;
    }
    Some(if is_resolved {
        format!("Issue resolution time {elapsed_days} days exceeds SLA of {sla_days} days.")
    } else {
        format!("Issue open for {elapsed_days} days exceeds SLA of {sla_days} days.")
    })
}
