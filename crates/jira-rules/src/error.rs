//! Errors raised while assembling a rule set.

use thiserror::Error;

/// Configuration rejected at rule-build time, before any record is read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("validations.valid_statuses must list at least one status")]
    EmptyValidStatuses,

    #[error("{key} contains a blank entry at position {position}")]
    BlankEntry { key: &'static str, position: usize },

    #[error("validations.sla_days must not be negative (got {sla_days})")]
    NegativeSlaDays { sla_days: i64 },
}

pub type Result<T> = std::result::Result<T, BuildError>;
