//! Card Pricing CLI

use std::{
    io::{self, Read},
    process::ExitCode,
};

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};

use card_pricing::{
    card::PriceVisibility,
    catalog::{CatalogError, CatalogProduct},
    report::{ReportError, write_report},
};

use crate::config::Config;

mod config;
mod logging;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
enum CliError {
    /// Reading stdin or writing stdout failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The product payload could not be decoded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The table could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Card Pricing entry point
pub fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(err) = logging::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{err}");
        }

        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "failed to resolve product pricing");

            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), CliError> {
    let product = match &config.input {
        Some(path) => {
            info!(path = %path.display(), "reading product payload");

            CatalogProduct::from_path(path)?
        }
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;

            CatalogProduct::from_json(&text)?
        }
    };

    let settings = PriceVisibility {
        hide_prices_for_guests: config.hide_prices_for_guests,
    };
    let view = product.card_view(Some(&settings), config.authenticated);

    write_report(&mut io::stdout().lock(), &product, &view, config.format)?;

    Ok(())
}
