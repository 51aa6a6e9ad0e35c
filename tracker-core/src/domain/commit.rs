//! Commit domain types

use serde::{Deserialize, Serialize};

/// The repository and revision a pipeline run executed against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commit {
    repo_url: String,
    sha: String,
}

impl Commit {
    /// Build a commit; `repo_url` should already be normalized
    pub fn new(repo_url: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            sha: sha.into(),
        }
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    pub fn sha(&self) -> &str {
        &self.sha
    }
}

impl std::fmt::Display for Commit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.repo_url, self.sha)
    }
}
