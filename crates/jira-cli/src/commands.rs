use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use jira_cli::pipeline::{self, RunPlan};
use jira_cli::types::ValidateResult;
use jira_config::AuditConfig;
use jira_rules::{RuleSet, Runner, build};

use crate::cli::{InitConfigArgs, RulesArgs, ValidateArgs};
use crate::summary::print_rules;

pub fn run_validate(config_path: &Path, args: &ValidateArgs) -> Result<ValidateResult> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;
    if args.enable_sla {
        config.pipelines.enable_sla_check = true;
    }

    let rules = build_rules(&config)?;
    let mut plan =
        RunPlan::from_config(&config.jira, &args.output).context("invalid jira settings")?;
    if let Some(input) = &args.input {
        plan.input.clone_from(input);
    }
    if let Some(chunk_size) = args.chunk_size {
        plan.chunk_size = chunk_size;
    }

    let runner = Runner::new(rules);
    let summary = pipeline::run(&runner, &plan)?;
    info!(
        records = summary.records,
        duration_ms = start.elapsed().as_millis(),
        "validate finished"
    );
    Ok(ValidateResult {
        config: config_path.to_path_buf(),
        input: plan.input,
        output: plan.output,
        summary,
    })
}

pub fn run_rules(config_path: &Path, args: &RulesArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    if args.enable_sla {
        config.pipelines.enable_sla_check = true;
    }
    let rules = build_rules(&config)?;
    print_rules(&rules);
    Ok(())
}

pub fn run_init_config(config_path: &Path, args: &InitConfigArgs) -> Result<()> {
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    jira_config::save(config_path, &AuditConfig::default())
        .with_context(|| format!("write {}", config_path.display()))?;
    println!("Wrote default configuration to {}", config_path.display());
    Ok(())
}

fn load_config(path: &Path) -> Result<AuditConfig> {
    let span = info_span!("config", path = %path.display());
    let _guard = span.enter();
    jira_config::load_or_init(path).with_context(|| format!("load config {}", path.display()))
}

fn build_rules(config: &AuditConfig) -> Result<RuleSet> {
    build(&config.pipelines, &config.validations).context("build rule set")
}
