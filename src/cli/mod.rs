//! CLI module for Cogni headless operation.
//!
//! The CLI drives the same session store as the overlay, so sessions
//! created by either are visible to both.
//!
//! ```text
//! +-----------+     +-------------+     +----------------+     +-----------+
//! | args.rs   | --> | bootstrap   | --> | runner.rs      | --> | output.rs |
//! | (clap)    |     | (CliContext)|     | (SessionStore) |     | text/JSON |
//! +-----------+     +-------------+     +----------------+     +-----------+
//! ```

mod args;
mod bootstrap;
mod output;
mod runner;

pub use args::{Args, Command};
pub use bootstrap::{initialize, CliContext};
pub use output::{print, use_json, Output};
pub use runner::{execute, run_command};
