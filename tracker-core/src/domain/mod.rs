//! Core domain types
//!
//! The records the tracker reads (pipeline runs) and the value objects it
//! hands back to the status-posting integration (commits, states, options).

pub mod commit;
pub mod pipeline_run;
pub mod status;
