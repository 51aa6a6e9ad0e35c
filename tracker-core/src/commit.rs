//! Commit extraction
//!
//! Works out which commit a pipeline run was executed against. The
//! source annotations are consulted first; when they are not both set,
//! the single git resource bound to the run supplies the URL and revision.

use tracing::{debug, warn};

use crate::config::AnnotationKeys;
use crate::domain::commit::Commit;
use crate::domain::pipeline_run::{PipelineRun, ResourceSpec, ResourceType};
use crate::error::{Result, TrackerError};

const GIT_SUFFIX: &str = ".git";

/// Extracts commits using a fixed set of annotation keys
#[derive(Debug, Clone, Default)]
pub struct CommitExtractor {
    keys: AnnotationKeys,
}

impl CommitExtractor {
    pub fn new(keys: AnnotationKeys) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &AnnotationKeys {
        &self.keys
    }

    /// Resolve the commit for a run
    pub fn extract(&self, run: &PipelineRun) -> Result<Commit> {
        commit_from_run(run, &self.keys)
    }
}

/// Resolve the commit a pipeline run refers to
///
/// # Errors
/// Returns an error if:
/// - More than one git resource is bound and the annotations are incomplete
/// - The git resource lacks a non-empty `url` or `revision`
/// - Neither the annotations nor the resources identify a commit
pub fn commit_from_run(run: &PipelineRun, keys: &AnnotationKeys) -> Result<Commit> {
    let url = non_empty(run.annotation(&keys.source_url));
    let sha = non_empty(run.annotation(&keys.source_sha));
    if let (Some(url), Some(sha)) = (url, sha) {
        debug!(run = %run.key(), "commit resolved from annotations");
        return Ok(Commit::new(normalize_repo_url(url), sha));
    }

    let spec = match find_git_resource(run) {
        Ok(spec) => spec,
        Err(TrackerError::NotFound(_)) => {
            return Err(TrackerError::NotFound(
                "failed to find commit for execution record".to_string(),
            ));
        }
        Err(err) => return Err(err),
    };

    let (url, sha) = repo_and_sha(spec)?;
    debug!(run = %run.key(), "commit resolved from git resource");
    Ok(Commit::new(normalize_repo_url(url), sha))
}

/// Like [`commit_from_run`] with the default annotation keys
pub fn commit_from_run_default(run: &PipelineRun) -> Result<Commit> {
    commit_from_run(run, &AnnotationKeys::default())
}

/// Find the one git resource bound to the run
pub fn find_git_resource(run: &PipelineRun) -> Result<&ResourceSpec> {
    let mut git_specs = run
        .spec
        .resources
        .iter()
        .filter_map(|binding| binding.resource_spec.as_ref())
        .filter(|spec| spec.resource_type == ResourceType::Git);

    let Some(first) = git_specs.next() else {
        return Err(TrackerError::NotFound(
            "failed to find a git resource in pipeline run".to_string(),
        ));
    };

    let extra = git_specs.count();
    if extra > 0 {
        warn!(run = %run.key(), count = extra + 1, "multiple git resources bound to run");
        return Err(TrackerError::Ambiguous { count: extra + 1 });
    }

    Ok(first)
}

/// Read the raw `url` and `revision` params of a git resource
pub fn repo_and_sha(spec: &ResourceSpec) -> Result<(&str, &str)> {
    if spec.resource_type != ResourceType::Git {
        return Err(TrackerError::NonGitResource(spec.resource_type));
    }

    let url = non_empty(spec.param("url"))
        .ok_or_else(|| TrackerError::MissingParam("url".to_string()))?;
    let revision = non_empty(spec.param("revision"))
        .ok_or_else(|| TrackerError::MissingParam("revision".to_string()))?;

    Ok((url, revision))
}

/// Strip a single trailing `.git`
pub fn normalize_repo_url(url: &str) -> &str {
    url.strip_suffix(GIT_SUFFIX).unwrap_or(url)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
