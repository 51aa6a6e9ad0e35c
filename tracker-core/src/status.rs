//! Commit status derivation
//!
//! Maps a pipeline run onto the status the provider should show: whether
//! the run asked for reporting at all, its state, and how the status is
//! labelled.

use std::collections::HashMap;
use tracing::debug;

use crate::config::{AnnotationKeys, DEFAULT_STATUS_CONTEXT};
use crate::domain::pipeline_run::{ConditionStatus, PipelineRun, SUCCEEDED_CONDITION};
use crate::domain::status::{CommitState, StatusOptions};

/// Check whether the run opted into status reporting
pub fn is_notifiable(run: &PipelineRun, keys: &AnnotationKeys) -> bool {
    run.annotation(&keys.git_status)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Derive the commit state from the run's `Succeeded` condition
///
/// A run with no status or no `Succeeded` condition yet is pending.
pub fn commit_state(run: &PipelineRun) -> CommitState {
    match run.condition(SUCCEEDED_CONDITION).map(|c| c.status) {
        Some(ConditionStatus::True) => CommitState::Success,
        Some(ConditionStatus::False) => CommitState::Failure,
        Some(ConditionStatus::Unknown) | None => CommitState::Pending,
    }
}

/// Read the status presentation from annotations, with defaults
pub fn status_options(
    run: &PipelineRun,
    keys: &AnnotationKeys,
    state: CommitState,
) -> StatusOptions {
    let context = annotation_or(run, &keys.status_context, DEFAULT_STATUS_CONTEXT);
    let description = annotation_or(run, &keys.status_description, state.default_description());
    let target_url = run
        .annotation(&keys.status_target_url)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    StatusOptions {
        context,
        description,
        target_url,
    }
}

fn annotation_or(run: &PipelineRun, key: &str, default: &str) -> String {
    run.annotation(key)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Remembers the last state planned for each run
///
/// Lets the reconciler skip posting when a run is seen again without its
/// state changing. Owned by the caller; it is not shared internally.
#[derive(Debug, Default)]
pub struct StatusTracker {
    last: HashMap<String, CommitState>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `state` for `run_key`, returning `true` if it changed
    pub fn needs_update(&mut self, run_key: &str, state: CommitState) -> bool {
        match self.last.insert(run_key.to_string(), state) {
            Some(previous) if previous == state => {
                debug!(run = run_key, %state, "status unchanged");
                false
            }
            _ => true,
        }
    }

    /// Drop the entry for a run, e.g. once it has been deleted
    pub fn forget(&mut self, run_key: &str) -> Option<CommitState> {
        self.last.remove(run_key)
    }

    /// Last recorded state for a run
    pub fn last_state(&self, run_key: &str) -> Option<CommitState> {
        self.last.get(run_key).copied()
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}
