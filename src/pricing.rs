//! Pricing
//!
//! Raw pricing fields of a catalog product, coerced on the way in.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    coercion::{deserialize_flag, deserialize_price, deserialize_strict_true},
    discounts::percent_points,
};

/// Pricing fields of a single product.
///
/// Every field is optional. Price fields accept numbers or numeric strings;
/// anything unusable deserializes to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricing {
    /// Price the product is actually sold at, when the catalog tracks it separately.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub base_price: Option<Decimal>,

    /// Regular (reference) price.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub regular_price: Option<Decimal>,

    /// Plain list price.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<Decimal>,

    /// Discounted price.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub sale_price: Option<Decimal>,

    /// Explicit sale override. `None` means "detect from prices".
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_sale: Option<bool>,

    /// Flash sale details, if the catalog sent any.
    #[serde(default, deserialize_with = "deserialize_flash_sale")]
    pub flash_sale: Option<FlashSale>,
}

impl ProductPricing {
    /// Returns the flash sale only when it is active.
    pub fn active_flash_sale(&self) -> Option<&FlashSale> {
        self.flash_sale.as_ref().filter(|flash| flash.is_active)
    }
}

/// Flash sale override attached to a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashSale {
    /// Only the literal `true` activates a flash sale.
    #[serde(default, deserialize_with = "deserialize_strict_true")]
    pub is_active: bool,

    /// Flash sale price.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub flash_sale_price: Option<Decimal>,

    /// Advertised discount, in whole percentage points.
    ///
    /// Taken as sent, then rounded half away from zero and clamped to
    /// `0..=100`: `250` reads as `100`, `-5` as `0`, `"12.5"` as `13`.
    /// Non-numeric values read as `0`.
    #[serde(default, deserialize_with = "deserialize_percent_points")]
    pub discount_percentage: u8,
}

/// Objects become a [`FlashSale`]; any other shape is ignored.
fn deserialize_flash_sale<'de, D>(deserializer: D) -> Result<Option<FlashSale>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    if !value.is_object() {
        return Ok(None);
    }

    Ok(serde_json::from_value(value).ok())
}

fn deserialize_percent_points<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_price(deserializer).map(|percent| percent.map_or(0, percent_points))
}
