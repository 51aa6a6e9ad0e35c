//! Error types for the tracker core

use thiserror::Error;

use crate::domain::pipeline_run::ResourceType;

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors returned while resolving commits and providers
#[derive(Debug, Error)]
pub enum TrackerError {
    /// No commit information could be derived
    #[error("{0}")]
    NotFound(String),

    /// More than one git resource is bound to the run
    #[error("found {count} git resources in pipeline run, expected exactly one")]
    Ambiguous {
        /// Number of git-typed bindings found
        count: usize,
    },

    /// Parameters were requested from a resource that is not git
    #[error("non-git resource: {0}")]
    NonGitResource(ResourceType),

    /// A required resource parameter is absent or empty
    #[error("failed to find param {0}")]
    MissingParam(String),

    /// The URL could not be parsed
    #[error("failed to parse repo URL {url:?}: {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: UrlError,
    },

    /// The URL host is not a known provider
    #[error("unable to determine type of Git host from: {0}")]
    UnknownHost(String),

    /// The URL has no path to take a repository from
    #[error("could not determine repo from URL: {0}")]
    NoRepoPath(String),

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Why a repository URL was rejected
#[derive(Debug, Error)]
pub enum UrlError {
    /// The URL parser refused the input
    #[error(transparent)]
    Parse(#[from] url::ParseError),

    /// A `%` is not followed by two hex digits, or appears in a host name
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
}

impl TrackerError {
    /// Create a malformed URL error from a parse failure
    pub fn malformed_url(url: impl Into<String>, source: impl Into<UrlError>) -> Self {
        Self::MalformedUrl {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Check if this error means no commit information was found
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error is caused by multiple git resources
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }

    /// Check if this error is caused by the URL itself (parse, host or path)
    pub fn is_url_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedUrl { .. } | Self::UnknownHost(_) | Self::NoRepoPath(_)
        )
    }
}
