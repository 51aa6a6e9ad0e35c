//! URL command handlers
//!
//! Driver and repository path lookups for a single repository URL.

use anyhow::{Context, Result};
use colored::*;
use tracker_core::extract_repo_path;

use crate::config::Config;

/// Print the driver that would post statuses for `url`
pub fn handle_driver(url: &str, config: &Config) -> Result<()> {
    let driver = config
        .drivers
        .resolve(url)
        .with_context(|| format!("Failed to resolve driver for {}", url))?;

    if config.json {
        println!("{}", serde_json::json!({ "url": url, "driver": driver }));
    } else {
        println!("{} {}", "✓".green().bold(), driver.as_str().cyan());
    }

    Ok(())
}

/// Print the repository path of `url`
pub fn handle_repo(url: &str, config: &Config) -> Result<()> {
    let repo_path = extract_repo_path(url)
        .with_context(|| format!("Failed to extract repository path from {}", url))?;

    if config.json {
        println!("{}", serde_json::json!({ "url": url, "repo": repo_path }));
    } else {
        println!("{} {}", "✓".green().bold(), repo_path.cyan());
    }

    Ok(())
}
