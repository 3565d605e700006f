//! # zonecheck-cli
//!
//! Command-line front end for the zonecheck probe pipeline.
//!
//! The core crates return structured outcomes and never touch the process;
//! everything process-shaped lives here: argument parsing, input
//! sanitization, colored status lines, and the exit-code contract that
//! calling scripts branch on.

pub mod cli;
pub mod output;
pub mod sanitize;

pub use cli::run;
