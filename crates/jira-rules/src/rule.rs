//! Rules and ordered rule sets.

use std::fmt;

use crate::predicate::Predicate;
use crate::validator::Validator;

/// A predicate gating an ordered list of validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub predicate: Predicate,
    pub validators: Vec<Validator>,
}

impl Rule {
    pub fn new(name: impl Into<String>, predicate: Predicate, validators: Vec<Validator>) -> Self {
        Self {
            name: name.into(),
            predicate,
            validators,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let validators: Vec<String> = self.validators.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{}: {} -> [{}]",
            self.name,
            self.predicate,
            validators.join(", ")
        )
    }
}

/// Ordered rules. Order decides the order of reported errors only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Total validator count across every rule.
    pub fn validator_count(&self) -> usize {
        self.rules.iter().map(|rule| rule.validators.len()).sum()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, rule) in self.rules.iter().enumerate() {
            writeln!(f, "{}. {rule}", idx + 1)?;
        }
        Ok(())
    }
}

/// Appends rules in call order.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
}

impl RuleSetBuilder {
    pub fn rule(
        mut self,
        name: impl Into<String>,
        predicate: Predicate,
        validators: Vec<Validator>,
    ) -> Self {
        self.rules.push(Rule::new(name, predicate, validators));
        self
    }

    pub fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn build(self) -> RuleSet {
        RuleSet { rules: self.rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{always, status_is};

    #[test]
    fn test_builder_keeps_order() {
        let set = RuleSet::builder()
            .rule("first", always(), vec![Validator::PriorityNotNull])
            .rule(
                "second",
                status_is("Open"),
                vec![Validator::AssigneeNotEmpty, Validator::ResolvedDateNotNull],
            )
            .build();

        let names: Vec<&str> = set.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.validator_count(), 3);
        assert!(set.get("second").is_some());
        assert!(set.get("third").is_none());
    }

    #[test]
    fn test_rule_display() {
        let rule = Rule::new(
            "open_checks",
            status_is("Open"),
            vec![Validator::AssigneeNotEmpty, Validator::within_sla(3)],
        );
        assert_eq!(
            rule.to_string(),
            "open_checks: status == 'Open' -> [assignee_not_empty, within_sla(3)]"
        );
    }

    #[test]
    fn test_empty_set() {
        let set = RuleSet::default();
        assert!(set.is_empty());
        assert_eq!(set.to_string(), "");
    }
}
