//! Commit status domain types

use serde::{Deserialize, Serialize};

/// State reported against a commit
///
/// Only states a run's `Succeeded` condition can map to are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitState {
    Pending,
    Success,
    Failure,
}

impl CommitState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    /// Description used when the run does not provide one
    pub const fn default_description(&self) -> &'static str {
        match self {
            Self::Pending => "pipeline run in progress",
            Self::Success => "pipeline run succeeded",
            Self::Failure => "pipeline run failed",
        }
    }
}

impl std::fmt::Display for CommitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation of a status on the hosting provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOptions {
    /// Label that groups statuses from the same pipeline
    pub context: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
}
