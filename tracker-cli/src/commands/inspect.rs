//! Inspect command handler
//!
//! Reads a pipeline run and prints the status plan the tracker would post.

use anyhow::{Context, Result};
use colored::*;
use std::io::Read;
use tracing::info;
use tracker_core::domain::pipeline_run::PipelineRun;
use tracker_core::status::is_notifiable;
use tracker_core::{CommitState, StatusPlan, plan_status};

use crate::config::Config;

/// Plan and print the status for the run in `path`
pub fn handle_inspect(path: &str, force: bool, config: &Config) -> Result<()> {
    let run = read_pipeline_run(path)?;

    if !force && !is_notifiable(&run, &config.keys) {
        info!(
            run = %run.key(),
            annotation = %config.keys.git_status,
            "run has not opted into status reporting"
        );
        if config.json {
            println!("{}", serde_json::json!({ "run": run.key(), "notifiable": false }));
        } else {
            println!(
                "{} {} is not annotated {}=true, nothing to post",
                "▸".yellow(),
                run.key().bold(),
                config.keys.git_status
            );
        }
        return Ok(());
    }

    let plan = plan_status(&run, &config.keys, &config.drivers)
        .with_context(|| format!("Failed to plan commit status for {}", run.key()))?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&run.key(), &plan);
    }

    Ok(())
}

fn read_pipeline_run(path: &str) -> Result<PipelineRun> {
    let content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read pipeline run from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline run file: {}", path))?
    };

    serde_json::from_str(&content).context("Failed to parse pipeline run JSON")
}

fn print_plan(run_key: &str, plan: &StatusPlan) {
    println!("{}", "Status Plan:".bold());
    println!("  Run:         {}", run_key.cyan());
    println!("  Repository:  {}", plan.commit.repo_url());
    println!("  Commit:      {}", plan.commit.sha().dimmed());
    println!("  Driver:      {}", plan.driver.as_str().cyan());
    println!("  Repo path:   {}", plan.repo_path);
    println!("  State:       {}", colored_state(plan.state));
    println!("  Context:     {}", plan.options.context);
    println!("  Description: {}", plan.options.description.dimmed());
    if let Some(target_url) = &plan.options.target_url {
        println!("  Target URL:  {}", target_url);
    }
}

fn colored_state(state: CommitState) -> ColoredString {
    match state {
        CommitState::Pending => state.as_str().yellow(),
        CommitState::Success => state.as_str().green(),
        CommitState::Failure => state.as_str().red(),
    }
}
