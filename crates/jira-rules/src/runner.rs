//! Executes a rule set against records.

use jira_model::{AnnotatedBatch, AnnotatedRecord, Record, RecordBatch};

use crate::observe::{NoopObserver, Observer};
use crate::rule::RuleSet;
use crate::validator::EvalContext;

/// Stateless executor over a fixed rule set; safe to share across threads.
#[derive(Debug, Clone)]
pub struct Runner {
    rules: RuleSet,
    ctx: EvalContext,
}

impl Runner {
    /// Runner whose notion of "now" is fixed at construction.
    pub fn new(rules: RuleSet) -> Self {
        Self::with_context(rules, EvalContext::current())
    }

    pub fn with_context(rules: RuleSet, ctx: EvalContext) -> Self {
        Self { rules, ctx }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// Errors for `record` in rule order, then validator order.
    pub fn run(&self, record: &Record) -> Vec<String> {
        self.run_with(record, &mut NoopObserver)
    }

    pub fn run_with<O: Observer + ?Sized>(&self, record: &Record, observer: &mut O) -> Vec<String> {
        observer.record_started(record);
        let mut errors = Vec::new();
        for rule in &self.rules {
            if !rule.predicate.evaluate_with(record, &mut *observer) {
                continue;
            }
            for validator in &rule.validators {
                let error = validator.check(record, &self.ctx);
                observer.validator_checked(record, validator, error.as_deref());
                errors.extend(error);
            }
        }
        errors
    }

    pub fn annotate(&self, batch: RecordBatch) -> AnnotatedBatch {
        self.annotate_with(batch, &mut NoopObserver)
    }

    /// Validate every record of `batch`, keeping row order.
    pub fn annotate_with<O: Observer + ?Sized>(
        &self,
        batch: RecordBatch,
        observer: &mut O,
    ) -> AnnotatedBatch {
        let rows = batch
            .records
            .into_iter()
            .map(|record| {
                let errors = self.run_with(&record, &mut *observer);
                AnnotatedRecord { record, errors }
            })
            .collect();
        AnnotatedBatch {
            index: batch.index,
            first_row: batch.first_row,
            columns: batch.columns,
            rows,
        }
    }
}

/// Turn a rule set into a record -> errors function.
pub fn run_pipeline(rules: RuleSet) -> impl Fn(&Record) -> Vec<String> {
    let runner = Runner::new(rules);
    move |record| runner.run(record)
}
