//! Library components of the `jira-audit` command.

pub mod logging;
pub mod pipeline;
pub mod types;
