//! Playground Cleaner - scheduled deletion of unused user snippets.
//!
//! Wraps [`playground_store::RetentionSweeper`] with environment
//! configuration, a per-sweep deadline and an interval schedule.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod job;

pub use config::{CleanerConfig, ConfigError};
pub use job::{log_outcome, SweepJob};
