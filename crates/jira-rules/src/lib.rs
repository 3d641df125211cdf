//! Rule pipeline for issue records.
//!
//! A [`RuleSet`] is an ordered list of [`Rule`]s. Each rule gates a list of
//! [`Validator`]s behind a [`Predicate`]; the [`Runner`] evaluates every
//! matching rule and collects the messages in rule order.
//!
//! ```
//! use jira_config::{PipelineConfig, ValidationConfig};
//! use jira_model::Record;
//! use jira_rules::{Runner, build};
//!
//! let rules = build(&PipelineConfig::default(), &ValidationConfig::default()).unwrap();
//! let runner = Runner::new(rules);
//! let record = Record::new()
//!     .with("type", "Bug")
//!     .with("status", "Open")
//!     .with("priority", "High")
//!     .with("assignee_id", "u1")
//!     .with("created", "2024-01-01")
//!     .with("updated", "2024-01-02");
//! assert!(runner.run(&record).is_empty());
//! ```

pub mod builder;
pub mod error;
pub mod observe;
pub mod predicate;
pub mod rule;
pub mod runner;
pub mod validator;

pub use builder::build;
pub use error::{BuildError, Result};
pub use observe::{CollectingObserver, Event, NoopObserver, Observer, TracingObserver};
pub use predicate::{Matcher, Predicate};
pub use rule::{Rule, RuleSet, RuleSetBuilder};
pub use runner::{Runner, run_pipeline};
pub use validator::{EvalContext, Validator};
