//! Command handlers for the bundle-dedupe CLI
//!
//! Thin glue between the filesystem and the engine: commands load
//! artifacts, run an analysis and render the result.

pub mod analyze;
pub mod completions;

pub use analyze::cmd_analyze;
pub use completions::cmd_completions;
