//! Tracing subscriber setup.
//!
//! Subcommands log to stderr. The TUI owns the terminal, so it logs to a
//! file next to the question store instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const CRATES: [&str; 3] = ["lq", "lq_core", "lq_expr"];

/// `RUST_LOG` when set, otherwise `level` for the workspace crates.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        CRATES
            .iter()
            .filter_map(|krate| format!("{krate}={level}").parse().ok())
            .fold(EnvFilter::default(), EnvFilter::add_directive)
    })
}

/// Warnings (or everything from debug up, with `-v`) on stderr.
pub fn init_stderr(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(if verbose { "debug" } else { "warn" }))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Append to `path`. Info and up, or debug with `-v`.
pub fn init_file(path: &Path, verbose: bool) -> Result<(), String> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open log file {}: {e}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(if verbose { "debug" } else { "info" }))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
