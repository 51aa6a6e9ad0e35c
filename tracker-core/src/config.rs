//! Tracker configuration
//!
//! The annotation keys read from pipeline runs. They are fixed once built
//! and passed by reference to every lookup.

use crate::error::{Result, TrackerError};

/// Annotation carrying the source repository URL
pub const SOURCE_URL_ANNOTATION: &str = "app.openshift.io/vcs-uri";
/// Annotation carrying the source revision
pub const SOURCE_SHA_ANNOTATION: &str = "app.openshift.io/vcs-ref";
/// Annotation that opts a run into status reporting
pub const GIT_STATUS_ANNOTATION: &str = "tekton.dev/git-status";
/// Annotation overriding the status context
pub const STATUS_CONTEXT_ANNOTATION: &str = "tekton.dev/status-context";
/// Annotation overriding the status description
pub const STATUS_DESCRIPTION_ANNOTATION: &str = "tekton.dev/status-description";
/// Annotation providing a link shown next to the status
pub const STATUS_TARGET_URL_ANNOTATION: &str = "tekton.dev/status-target-url";

/// Context used when a run does not set one
pub const DEFAULT_STATUS_CONTEXT: &str = "default";

/// Annotation keys consulted on pipeline runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationKeys {
    pub source_url: String,
    pub source_sha: String,
    pub git_status: String,
    pub status_context: String,
    pub status_description: String,
    pub status_target_url: String,
}

impl AnnotationKeys {
    /// Replace the source URL/SHA keys, keeping the status keys
    pub fn with_source_keys(
        mut self,
        source_url: impl Into<String>,
        source_sha: impl Into<String>,
    ) -> Self {
        self.source_url = source_url.into();
        self.source_sha = source_sha.into();
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let keys = [
            ("source_url", &self.source_url),
            ("source_sha", &self.source_sha),
            ("git_status", &self.git_status),
            ("status_context", &self.status_context),
            ("status_description", &self.status_description),
            ("status_target_url", &self.status_target_url),
        ];

        for (field, key) in keys {
            if key.trim().is_empty() {
                return Err(TrackerError::InvalidConfig(format!(
                    "{} annotation key cannot be empty",
                    field
                )));
            }
        }

        if self.source_url == self.source_sha {
            return Err(TrackerError::InvalidConfig(format!(
                "source URL and SHA annotations must differ, both are {:?}",
                self.source_url
            )));
        }

        Ok(())
    }
}

impl Default for AnnotationKeys {
    fn default() -> Self {
        Self {
            source_url: SOURCE_URL_ANNOTATION.to_string(),
            source_sha: SOURCE_SHA_ANNOTATION.to_string(),
            git_status: GIT_STATUS_ANNOTATION.to_string(),
            status_context: STATUS_CONTEXT_ANNOTATION.to_string(),
            status_description: STATUS_DESCRIPTION_ANNOTATION.to_string(),
            status_target_url: STATUS_TARGET_URL_ANNOTATION.to_string(),
        }
    }
}
