//! Diagnostic logging to stderr.

use std::io;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";

/// Installs the global subscriber.
///
/// Stdout carries the run summary and `normalize` output, so logs go to
/// stderr. Calling this twice is harmless.
pub fn configure_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stderr_log = fmt::layer().with_writer(io::stderr).with_target(false).with_filter(filter);

    let _ = tracing_subscriber::registry().with(stderr_log).try_init();
}
