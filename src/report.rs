//! Report
//!
//! Terminal rendering of a product's resolved pricing.

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{card::CardView, catalog::CatalogProduct, resolver::Badge};

/// Errors writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// JSON output could not be encoded.
    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a resolved card is written out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,

    /// Pretty-printed JSON of the resolved pricing.
    Json,
}

/// Write a product's card in the requested format.
///
/// # Errors
///
/// Returns [`ReportError`] if the output cannot be encoded or written.
pub fn write_report(
    out: &mut impl io::Write,
    product: &CatalogProduct,
    view: &CardView,
    format: OutputFormat,
) -> Result<(), ReportError> {
    match format {
        OutputFormat::Table => write_card_report(out, product, view),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &view.pricing)?;
            writeln!(out)?;

            Ok(())
        }
    }
}

/// Write a two-column table describing a product's card pricing.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the output cannot be written.
pub fn write_card_report(
    out: &mut impl io::Write,
    product: &CatalogProduct,
    view: &CardView,
) -> Result<(), ReportError> {
    let pricing = &view.pricing;
    let mut builder = Builder::default();

    builder.push_record(["Field", "Value"]);
    builder.push_record(["Product", display_name(product)]);
    builder.push_record(["Rule", pricing.rule.name()]);
    builder.push_record(["Current price".to_string(), money(pricing.current_price)]);
    builder.push_record([
        "Original price".to_string(),
        pricing.original_price.map_or_else(|| "-".to_string(), money),
    ]);
    builder.push_record(["Display price".to_string(), money(pricing.display_price)]);
    builder.push_record(["On sale", yes_no(pricing.has_sale)]);
    builder.push_record(["Flash sale", yes_no(pricing.show_flash_sale_badge)]);
    builder.push_record(["Discount".to_string(), format!("{}%", pricing.discount_percent)]);
    builder.push_record(["Badge", badge_label(view.badge)]);
    builder.push_record(["Strike-through", yes_no(view.shows_original_price)]);
    builder.push_record(["Price visible", yes_no(view.price_visible)]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

fn display_name(product: &CatalogProduct) -> &str {
    if product.name.is_empty() {
        &product.id
    } else {
        &product.name
    }
}

fn money(amount: Decimal) -> String {
    format!("{amount:.2}")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn badge_label(badge: Option<Badge>) -> &'static str {
    match badge {
        Some(Badge::FlashSale) => "flash sale",
        Some(Badge::Sale) => "sale",
        None => "-",
    }
}
