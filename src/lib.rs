//! `subst` replaces a literal byte sequence in place across a directory tree.
//!
//! It provides the core logic for the `subst` command-line tool. A run is three
//! stages applied to one file at a time:
//!
//! - `walker`: a lexically ordered walk that skips hidden (`.`), underscore
//!   (`_`) and `vendor` entries, pruning ignored directories.
//! - `prompt`: an optional per-file yes/no confirmation.
//! - `replacer`: reads the whole file, replaces every non-overlapping
//!   occurrence, and writes it back.
//!
//! The first error from any stage stops the run.

pub mod cli;
pub mod config;
pub mod errors;
pub mod prompt;
pub mod replacer;
pub mod walker;

// Re-export main types for easier access by library users.
pub use config::ReplaceConfig;
pub use errors::{Error, Result};
pub use replacer::{Replacer, RunStats, run_replace};
