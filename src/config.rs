//! Command-line configuration

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};

use card_pricing::report::OutputFormat;

/// Log line layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One line per event.
    Compact,

    /// Multi-line events with span context.
    Full,

    /// Newline-delimited JSON.
    Json,
}

/// Diagnostic output on stderr.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log more: -v shows rule selection, -vv shows discarded input
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Filter directive overriding -v/-q, e.g. `card_pricing::coercion=trace`
    #[arg(long, env = "CARD_PRICING_LOG")]
    pub log_filter: Option<String>,

    /// Log line layout
    #[arg(long, env = "CARD_PRICING_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl LoggingConfig {
    /// The `EnvFilter` directive these flags ask for.
    pub fn filter_directive(&self) -> &str {
        if let Some(filter) = &self.log_filter {
            return filter;
        }

        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "card_pricing=debug,warn",
            (false, _) => "card_pricing=trace,warn",
        }
    }
}

/// Resolve product card pricing from a catalog payload
#[derive(Debug, Parser)]
#[command(name = "card-pricing", version, about, long_about = None)]
pub struct Config {
    /// Product payload (JSON, or YAML for .yml/.yaml). Reads JSON from stdin when omitted.
    pub input: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, env = "CARD_PRICING_FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Resolve as a signed-in shopper.
    #[arg(long)]
    pub authenticated: bool,

    /// Hide prices from guests.
    #[arg(long)]
    pub hide_prices_for_guests: bool,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
