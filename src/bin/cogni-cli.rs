//! Cogni CLI - Headless access to overlay sessions
//!
//! Lists, creates and edits the sessions the overlay stores, without
//! opening a window.
//!
//! # Usage
//!
//! ```bash
//! # Build the CLI binary
//! cargo build --features cli --no-default-features --bin cogni-cli
//!
//! # Newest session first
//! ./target/debug/cogni-cli list
//!
//! # Attach a file to the newest session
//! ./target/debug/cogni-cli upload ~/Downloads/brief.pdf
//!
//! # Machine-readable output
//! ./target/debug/cogni-cli --json show | jq .data.notes
//! ```
//!
//! # Features
//!
//! This binary requires the `cli` feature flag and is mutually exclusive
//! with the `tauri` feature (GUI application).

use anyhow::Result;
use clap::Parser;

use cogni_lib::cli::{execute, initialize, print, use_json, Args};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let json = use_json(args.json);

    let ctx = initialize(args).await?;
    let output = execute(&ctx).await?;

    print(&output, json)
}
