//! Log setup for the chatviz binary.
//!
//! The library only emits `tracing` events. The binary decides where they
//! go: compact lines on stderr by default, or plain lines appended to a file
//! with `--log-file`.
//!
//! ## Verbosity
//!
//! | Flag | Level |
//! |------|-------|
//! | (none) | `warn` |
//! | `-v` | `info` |
//! | `-vv` | `debug` |
//! | `-vvv` | `trace` |
//!
//! `RUST_LOG` overrides the level derived from the flags.

use std::env;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::Result;

/// Maps the number of `-v` flags to a level directive.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_filter(verbosity: u8) -> EnvFilter {
    // Allow RUST_LOG to override
    match env::var("RUST_LOG") {
        Ok(rust_log) if !rust_log.trim().is_empty() => EnvFilter::new(rust_log),
        _ => EnvFilter::new(level_for_verbosity(verbosity)),
    }
}

/// Installs the global subscriber.
///
/// Calling this twice is harmless; the second subscriber is ignored.
///
/// # Errors
///
/// Returns [`ChatvizError::Io`](crate::ChatvizError::Io) if the log file
/// cannot be opened.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let subscriber = tracing_subscriber::registry().with(build_filter(verbosity));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let fmt_layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file));
            let _ = subscriber.with(fmt_layer).try_init();
        }
        None => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr);
            let _ = subscriber.with(fmt_layer).try_init();
        }
    }
    Ok(())
}
