//! Diagnostic observers for rule evaluation.
//!
//! Evaluation itself is pure; observers receive a notification for every
//! predicate application and validator check so a run can be audited
//! without wrapping the rules themselves.

use jira_model::Record;

use crate::predicate::Predicate;
use crate::validator::Validator;

/// Receives evaluation events from the runner.
pub trait Observer {
    fn record_started(&mut self, _record: &Record) {}

    fn predicate_evaluated(&mut self, _record: &Record, _predicate: &Predicate, _matched: bool) {}

    fn validator_checked(&mut self, _record: &Record, _validator: &Validator, _error: Option<&str>) {
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Forwards events to `tracing` at trace level, keyed by the issue key.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn record_started(&mut self, record: &Record) {
        tracing::trace!(key = %record.key(), "running pipeline");
    }

    fn predicate_evaluated(&mut self, record: &Record, predicate: &Predicate, matched: bool) {
        tracing::trace!(key = %record.key(), predicate = %predicate, matched, "predicate");
    }

    fn validator_checked(&mut self, record: &Record, validator: &Validator, error: Option<&str>) {
        tracing::trace!(
            key = %record.key(),
            validator = validator.name(),
            error = error.unwrap_or(""),
            "validator"
        );
    }
}

/// A single recorded evaluation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Started { key: String },
    Predicate { key: String, predicate: String, matched: bool },
    Validator { key: String, validator: &'static str, error: Option<String> },
}

/// Keeps every event in memory, in evaluation order.
#[derive(Debug, Clone, Default)]
pub struct CollectingObserver {
    pub events: Vec<Event>,
}

impl Observer for CollectingObserver {
    fn record_started(&mut self, record: &Record) {
        self.events.push(Event::Started { key: record.key() });
    }

    fn predicate_evaluated(&mut self, record: &Record, predicate: &Predicate, matched: bool) {
        self.events.push(Event::Predicate {
            key: record.key(),
            predicate: predicate.to_string(),
            matched,
        });
    }

    fn validator_checked(&mut self, record: &Record, validator: &Validator, error: Option<&str>) {
        self.events.push(Event::Validator {
            key: record.key(),
            validator: validator.name(),
            error: error.map(str::to_string),
        });
    }
}
