//! Assembles the default rule set from configuration.

use jira_config::{PipelineConfig, ValidationConfig, ValueSet};

use crate::error::{BuildError, Result};
use crate::predicate::{always, and, is_null, not, status_is, type_is};
use crate::rule::RuleSet;
use crate::validator::Validator;

pub const ASSIGNEE_FOR_TYPES: &str = "assignee_for_types";
pub const RESOLVED_DATE_FOR_STATUSES: &str = "resolved_date_for_statuses";
pub const IN_PROGRESS_HAS_ASSIGNEE: &str = "in_progress_has_assignee";
pub const PRIORITY_EXCEPT_EPIC: &str = "priority_except_epic";
pub const UPDATED_AFTER_CREATED: &str = "updated_after_created";
pub const STATUS_AND_DATES: &str = "status_and_dates";
pub const WITHIN_SLA: &str = "within_sla";

/// Build the rule set, binding validator parameters now.
///
/// The SLA rule is appended only when `pipelines.enable_sla_check` is set.
pub fn build(pipelines: &PipelineConfig, validations: &ValidationConfig) -> Result<RuleSet> {
    check_value_set(
        "pipelines.require_assignee_for_types",
        &pipelines.require_assignee_for_types,
    )?;
    check_value_set(
        "pipelines.require_resolved_date_for_statuses",
        &pipelines.require_resolved_date_for_statuses,
    )?;
    if validations.valid_statuses.is_empty() {
        return Err(BuildError::EmptyValidStatuses);
    }
    check_entries(
        "validations.valid_statuses",
        validations.valid_statuses.iter().map(String::as_str),
    )?;
    if validations.sla_days < 0 {
        return Err(BuildError::NegativeSlaDays {
            sla_days: validations.sla_days,
        });
    }

    let mut builder = RuleSet::builder()
        .rule(
            ASSIGNEE_FOR_TYPES,
            type_is(&pipelines.require_assignee_for_types),
            vec![Validator::AssigneeNotEmpty],
        )
        .rule(
            RESOLVED_DATE_FOR_STATUSES,
            status_is(&pipelines.require_resolved_date_for_statuses),
            vec![Validator::ResolvedDateNotNull],
        )
        .rule(
            IN_PROGRESS_HAS_ASSIGNEE,
            status_is("In Progress"),
            vec![Validator::AssigneeNotEmpty],
        )
        .rule(
            PRIORITY_EXCEPT_EPIC,
            not(type_is("Epic")),
            vec![Validator::PriorityNotNull],
        )
        .rule(
            UPDATED_AFTER_CREATED,
            and(vec![not(is_null("created")), not(is_null("updated"))]),
            vec![Validator::UpdatedAfterCreated],
        )
        .rule(
            STATUS_AND_DATES,
            always(),
            vec![
                Validator::status_is_valid(validations.valid_statuses.iter().cloned()),
                Validator::UpdatedAfterCreated,
            ],
        );

    if pipelines.enable_sla_check {
        builder = builder.rule(
            WITHIN_SLA,
            always(),
            vec![Validator::within_sla(validations.sla_days)],
        );
    }

    let rules = builder.build();
    tracing::debug!(
        rules = rules.len(),
        validators = rules.validator_count(),
        sla_check = pipelines.enable_sla_check,
        "built rule set"
    );
    Ok(rules)
}

fn check_value_set(key: &'static str, values: &ValueSet) -> Result<()> {
    check_entries(key, values.values())
}

fn check_entries<'a>(key: &'static str, entries: impl Iterator<Item = &'a str>) -> Result<()> {
    for (position, entry) in entries.enumerate() {
        if entry.trim().is_empty() {
            return Err(BuildError::BlankEntry { key, position });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Predicate;

    fn configs() -> (PipelineConfig, ValidationConfig) {
        (PipelineConfig::default(), ValidationConfig::default())
    }

    #[test]
    fn test_default_rule_order() {
        let (pipelines, validations) = configs();
        let rules = build(&pipelines, &validations).unwrap();
        let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            [
                ASSIGNEE_FOR_TYPES,
                RESOLVED_DATE_FOR_STATUSES,
                IN_PROGRESS_HAS_ASSIGNEE,
                PRIORITY_EXCEPT_EPIC,
                UPDATED_AFTER_CREATED,
                STATUS_AND_DATES,
            ]
        );
        assert_eq!(rules.validator_count(), 7);
    }

    #[test]
    fn test_validators_bound_at_build_time() {
        let (pipelines, mut validations) = configs();
        validations.valid_statuses = vec!["Open".into()];
        let rules = build(&pipelines, &validations).unwrap();
        validations.valid_statuses.push("Closed".into());

        let last = rules.get(STATUS_AND_DATES).unwrap();
        assert_eq!(
            last.validators[0],
            Validator::StatusIsValid {
                valid_statuses: vec!["Open".into()]
            }
        );
        assert_eq!(last.predicate, Predicate::Always);
    }

    #[test]
    fn test_single_value_sets_become_equality() {
        let (mut pipelines, validations) = configs();
        pipelines.require_assignee_for_types = ValueSet::from("Bug");
        let rules = build(&pipelines, &validations).unwrap();
        assert_eq!(
            rules.get(ASSIGNEE_FOR_TYPES).unwrap().predicate.to_string(),
            "type == 'Bug'"
        );
    }

    #[test]
    fn test_sla_rule_is_opt_in() {
        let (mut pipelines, validations) = configs();
        assert!(build(&pipelines, &validations).unwrap().get(WITHIN_SLA).is_none());

        pipelines.enable_sla_check = true;
        let rules = build(&pipelines, &validations).unwrap();
        assert_eq!(rules.len(), 7);
        assert_eq!(
            rules.get(WITHIN_SLA).unwrap().validators,
            vec![Validator::within_sla(7)]
        );
    }

    #[test]
    fn test_rejects_empty_valid_statuses() {
        let (pipelines, mut validations) = configs();
        validations.valid_statuses.clear();
        assert_eq!(
            build(&pipelines, &validations),
            Err(BuildError::EmptyValidStatuses)
        );
    }

    #[test]
    fn test_rejects_blank_entries() {
        let (mut pipelines, validations) = configs();
        pipelines.require_resolved_date_for_statuses = ValueSet::from(vec!["Closed", " "]);
        assert_eq!(
            build(&pipelines, &validations),
            Err(BuildError::BlankEntry {
                key: "pipelines.require_resolved_date_for_statuses",
                position: 1,
            })
        );
    }

    #[test]
    fn test_rejects_negative_sla() {
        let (pipelines, mut validations) = configs();
        validations.sla_days = -1;
        assert_eq!(
            build(&pipelines, &validations),
            Err(BuildError::NegativeSlaDays { sla_days: -1 })
        );
    }
}
