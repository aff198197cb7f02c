//! Logger bootstrap.

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};

/// Start logging to stderr.
///
/// `RUST_LOG` wins over the configured level unless `verbose` is set, which
/// always logs at debug.
pub fn init(configured_level: &str, verbose: bool) -> Result<LoggerHandle> {
    let logger = if verbose {
        Logger::try_with_str("debug")
    } else {
        Logger::try_with_env_or_str(configured_level)
    };
    let logger = logger.with_context(|| format!("Invalid log level '{}'", configured_level))?;

    logger
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .context("Could not start logger")
}
