//! Tracker Core
//!
//! Commit identity and provider resolution for posting commit statuses on
//! behalf of pipeline runs.
//!
//! This crate contains:
//! - Domain types: pipeline run records, commits, commit states
//! - Commit extraction: annotations first, then the run's git resource
//! - Provider resolution: host to driver, URL to repository path
//! - Status derivation: state, labelling and change tracking per run
//!
//! Every operation is synchronous and free of I/O; networking, credentials
//! and the reconcile loop belong to the caller.
//!
//! # Example
//!
//! ```
//! use tracker_core::{AnnotationKeys, DriverTable, plan_status};
//! use tracker_core::domain::pipeline_run::PipelineRun;
//!
//! let run: PipelineRun = serde_json::from_str(r#"{
//!     "metadata": {"name": "build-1", "namespace": "ci"},
//!     "spec": {"resources": [{
//!         "name": "source",
//!         "resourceSpec": {"type": "git", "params": [
//!             {"name": "url", "value": "https://github.com/tektoncd/triggers.git"},
//!             {"name": "revision", "value": "main"}
//!         ]}
//!     }]}
//! }"#)?;
//!
//! let plan = plan_status(&run, &AnnotationKeys::default(), &DriverTable::default())?;
//! assert_eq!(plan.repo_path, "tektoncd/triggers");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod commit;
pub mod config;
pub mod domain;
pub mod error;
pub mod plan;
pub mod scm;
pub mod status;

#[cfg(test)]
mod testing;

pub use commit::{CommitExtractor, commit_from_run, commit_from_run_default};
pub use config::AnnotationKeys;
pub use domain::commit::Commit;
pub use domain::status::{CommitState, StatusOptions};
pub use error::{Result, TrackerError, UrlError};
pub use plan::{StatusPlan, plan_status};
pub use scm::{Driver, DriverTable, extract_repo_path, resolve_driver};
pub use status::StatusTracker;
