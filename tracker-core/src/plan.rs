//! Status plans
//!
//! A [`StatusPlan`] gathers everything the status-posting integration needs
//! for one run: which client to use, which repository and commit to address
//! and what to post.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commit::commit_from_run;
use crate::config::AnnotationKeys;
use crate::domain::commit::Commit;
use crate::domain::pipeline_run::PipelineRun;
use crate::domain::status::{CommitState, StatusOptions};
use crate::error::Result;
use crate::scm::{Driver, DriverTable, extract_repo_path};
use crate::status::{commit_state, status_options};

/// Status to post for a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPlan {
    pub commit: Commit,
    pub driver: Driver,
    /// Repository path on the provider, e.g. `org/repo`
    pub repo_path: String,
    pub state: CommitState,
    pub options: StatusOptions,
}

/// Build the status plan for a run
///
/// # Errors
/// Returns the first failure from commit extraction, driver resolution or
/// repo path extraction.
pub fn plan_status(
    run: &PipelineRun,
    keys: &AnnotationKeys,
    drivers: &DriverTable,
) -> Result<StatusPlan> {
    let commit = commit_from_run(run, keys)?;
    let driver = drivers.resolve(commit.repo_url())?;
    let repo_path = extract_repo_path(commit.repo_url())?;
    let state = commit_state(run);
    let options = status_options(run, keys, state);

    debug!(run = %run.key(), %driver, %state, "planned commit status");

    Ok(StatusPlan {
        commit,
        driver,
        repo_path,
        state,
        options,
    })
}
