//! Logging subscriber initialisation.

use std::{error::Error as StdError, io};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// The global subscriber could not be installed.
#[derive(Debug, Error)]
#[error("failed to install log subscriber: {0}")]
pub struct LoggingError(Box<dyn StdError + Send + Sync>);

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for the report.
pub fn init_subscriber(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(config.filter_directive()).unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);

    let installed = match config.log_format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Full => builder.try_init(),
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
    };

    installed.map_err(LoggingError)
}
