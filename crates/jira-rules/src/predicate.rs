//! Predicates selecting which validators apply to a record.
//!
//! Every predicate is total: a missing, null, or mistyped field makes the
//! condition false (except for [`is_null`], which tests exactly that).

use std::fmt;

use chrono::NaiveDateTime;
use jira_config::ValueSet;
use jira_model::{FieldValue, Record, fields};

use crate::observe::{NoopObserver, Observer};

/// Value(s) a field is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Equality with one value.
    Single(String),
    /// Membership in a list of values.
    Many(Vec<String>),
}

impl Matcher {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Single(expected) => expected == value,
            Self::Many(options) => options.iter().any(|option| option == value),
        }
    }
}

impl From<&str> for Matcher {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for Matcher {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for Matcher {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for Matcher {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Matcher {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_string()).collect())
    }
}

impl From<&ValueSet> for Matcher {
    fn from(values: &ValueSet) -> Self {
        match values {
            ValueSet::One(value) => Self::Single(value.clone()),
            ValueSet::Many(values) => Self::Many(values.clone()),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write!(f, "== '{value}'"),
            Self::Many(values) => write!(f, "in {}", quoted_list(values)),
        }
    }
}

/// Boolean test over a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Always,
    FieldIs { field: String, matcher: Matcher },
    IsAssigned { target: Option<String> },
    CreatedBefore(NaiveDateTime),
    CreatedAfter(NaiveDateTime),
    IsNull { field: String },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn evaluate(&self, record: &Record) -> bool {
        self.evaluate_with(record, &mut NoopObserver)
    }

    /// Evaluate, reporting this predicate and every evaluated sub-predicate
    /// to `observer`. Combinators short-circuit.
    pub fn evaluate_with<O: Observer + ?Sized>(&self, record: &Record, observer: &mut O) -> bool {
        let matched = match self {
            Self::Always => true,
            Self::FieldIs { field, matcher } => record
                .get(field)
                .as_text()
                .is_some_and(|value| matcher.matches(value)),
            Self::IsAssigned { target: Some(target) } => {
                record.get(fields::ASSIGNEE_ID).as_text() == Some(target.as_str())
            }
            Self::IsAssigned { target: None } => has_assignee(record.get(fields::ASSIGNEE_ID)),
            Self::CreatedBefore(date) => created(record).is_some_and(|created| created < *date),
            Self::CreatedAfter(date) => created(record).is_some_and(|created| created > *date),
            Self::IsNull { field } => record.is_null(field),
            Self::And(predicates) => predicates
                .iter()
                .all(|predicate| predicate.evaluate_with(record, &mut *observer)),
            Self::Or(predicates) => predicates
                .iter()
                .any(|predicate| predicate.evaluate_with(record, &mut *observer)),
            Self::Not(inner) => !inner.evaluate_with(record, &mut *observer),
        };
        observer.predicate_evaluated(record, self, matched);
        matched
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::FieldIs { field, matcher } => write!(f, "{field} {matcher}"),
            Self::IsAssigned { target: Some(target) } => write!(f, "is_assigned('{target}')"),
            Self::IsAssigned { target: None } => f.write_str("is_assigned"),
            Self::CreatedBefore(date) => write!(f, "created < {date}"),
            Self::CreatedAfter(date) => write!(f, "created > {date}"),
            Self::IsNull { field } => write!(f, "is_null({field})"),
            Self::And(predicates) => write_call(f, "and", predicates),
            Self::Or(predicates) => write_call(f, "or", predicates),
            Self::Not(inner) => write!(f, "not({inner})"),
        }
    }
}

fn write_call(f: &mut fmt::Formatter<'_>, name: &str, predicates: &[Predicate]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (idx, predicate) in predicates.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{predicate}")?;
    }
    f.write_str(")")
}

fn has_assignee(value: &FieldValue) -> bool {
    value.as_text().is_some_and(|text| !text.trim().is_empty())
}

fn created(record: &Record) -> Option<NaiveDateTime> {
    record.get(fields::CREATED).as_timestamp()
}

/// Render values the way they appear in error messages: `['A', 'B']`.
pub(crate) fn quoted_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
    format!("[{}]", items.join(", "))
}

/// True when `record[field]` equals / is a member of `matcher`.
pub fn field_is(field: impl Into<String>, matcher: impl Into<Matcher>) -> Predicate {
    Predicate::FieldIs {
        field: field.into(),
        matcher: matcher.into(),
    }
}

pub fn status_is(matcher: impl Into<Matcher>) -> Predicate {
    field_is(fields::STATUS, matcher)
}

pub fn priority_is(matcher: impl Into<Matcher>) -> Predicate {
    field_is(fields::PRIORITY, matcher)
}

pub fn type_is(matcher: impl Into<Matcher>) -> Predicate {
    field_is(fields::TYPE, matcher)
}

/// With a target, true iff `assignee_id` equals it. Without one (or with a
/// blank one), true iff the record has a non-blank assignee.
pub fn is_assigned(target: Option<&str>) -> Predicate {
    Predicate::IsAssigned {
        target: target
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    }
}

pub fn created_before(date: NaiveDateTime) -> Predicate {
    Predicate::CreatedBefore(date)
}

pub fn created_after(date: NaiveDateTime) -> Predicate {
    Predicate::CreatedAfter(date)
}

/// True iff the field is absent or null.
pub fn is_null(field: impl Into<String>) -> Predicate {
    Predicate::IsNull {
        field: field.into(),
    }
}

/// True iff every predicate is true; `and(vec![])` is always true.
pub fn and(predicates: Vec<Predicate>) -> Predicate {
    Predicate::And(predicates)
}

/// True iff any predicate is true; `or(vec![])` is always false.
pub fn or(predicates: Vec<Predicate>) -> Predicate {
    Predicate::Or(predicates)
}

pub fn not(predicate: Predicate) -> Predicate {
    Predicate::Not(Box::new(predicate))
}

pub fn always() -> Predicate {
    Predicate::Always
}

#[cfg(test)]
mod tests {
    use super::*;
    use jira_model::parse_timestamp;

    fn ts(raw: &str) -> NaiveDateTime {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn test_field_is_single_and_many() {
        let record = Record::new().with("type", "Bug");
        assert!(type_is("Bug").evaluate(&record));
        assert!(!type_is("Story").evaluate(&record));
        assert!(type_is(vec!["Story", "Bug"]).evaluate(&record));
        assert!(!type_is(vec!["Story", "Epic"]).evaluate(&record));
    }

    #[test]
    fn test_field_is_missing_or_null_is_false() {
        let empty = Record::new();
        assert!(!status_is("Open").evaluate(&empty));
        let null = Record::new().with("status", FieldValue::Null);
        assert!(!status_is(vec!["Open"]).evaluate(&null));
    }

    #[test]
    fn test_field_is_ignores_non_text() {
        let record = Record::new().with("priority", 3.0);
        assert!(!priority_is("3").evaluate(&record));
    }

    #[test]
    fn test_is_assigned_any() {
        let pred = is_assigned(None);
        assert!(pred.evaluate(&Record::new().with("assignee_id", "u1")));
        assert!(!pred.evaluate(&Record::new().with("assignee_id", "   ")));
        assert!(!pred.evaluate(&Record::new().with("assignee_id", FieldValue::Null)));
        assert!(!pred.evaluate(&Record::new()));
        assert!(!pred.evaluate(&Record::new().with("assignee_id", 7.0)));
    }

    #[test]
    fn test_is_assigned_target() {
        let pred = is_assigned(Some("alice"));
        assert!(pred.evaluate(&Record::new().with("assignee_id", "alice")));
        assert!(!pred.evaluate(&Record::new().with("assignee_id", "bob")));
        assert!(!pred.evaluate(&Record::new()));
        assert_eq!(is_assigned(Some("")), is_assigned(None));
    }

    #[test]
    fn test_created_comparisons_are_strict() {
        let pivot = ts("2024-01-10");
        let on = Record::new().with("created", "2024-01-10");
        let before = Record::new().with("created", "2024-01-09 23:59:59");
        let after = Record::new().with("created", ts("2024-01-11"));

        assert!(!created_before(pivot).evaluate(&on));
        assert!(!created_after(pivot).evaluate(&on));
        assert!(created_before(pivot).evaluate(&before));
        assert!(created_after(pivot).evaluate(&after));
    }

    #[test]
    fn test_created_comparisons_missing_or_garbage_is_false() {
        let pivot = ts("2024-01-10");
        for record in [
            Record::new(),
            Record::new().with("created", FieldValue::Null),
            Record::new().with("created", "not a date"),
        ] {
            assert!(!created_before(pivot).evaluate(&record));
            assert!(!created_after(pivot).evaluate(&record));
        }
    }

    #[test]
    fn test_is_null() {
        assert!(is_null("resolved").evaluate(&Record::new()));
        assert!(is_null("resolved").evaluate(&Record::new().with("resolved", FieldValue::Null)));
        assert!(!is_null("resolved").evaluate(&Record::new().with("resolved", "")));
    }

    #[test]
    fn test_combinators() {
        let record = Record::new().with("type", "Bug");
        assert!(and(vec![]).evaluate(&record));
        assert!(!or(vec![]).evaluate(&record));
        assert!(and(vec![always(), type_is("Bug")]).evaluate(&record));
        assert!(!and(vec![always(), type_is("Epic")]).evaluate(&record));
        assert!(or(vec![type_is("Epic"), type_is("Bug")]).evaluate(&record));
        assert!(!not(always()).evaluate(&record));
    }

    #[test]
    fn test_display() {
        let pred = and(vec![not(is_null("created")), not(is_null("updated"))]);
        assert_eq!(
            pred.to_string(),
            "and(not(is_null(created)), not(is_null(updated)))"
        );
        assert_eq!(type_is(vec!["Story", "Bug"]).to_string(), "type in ['Story', 'Bug']");
        assert_eq!(status_is("In Progress").to_string(), "status == 'In Progress'");
    }

    #[test]
    fn test_matcher_from_value_set() {
        assert_eq!(
            Matcher::from(&ValueSet::One("Bug".to_string())),
            Matcher::Single("Bug".to_string())
        );
        assert_eq!(
            Matcher::from(&ValueSet::Many(vec!["A".to_string()])),
            Matcher::Many(vec!["A".to_string()])
        );
    }
}
