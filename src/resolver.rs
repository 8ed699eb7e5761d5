//! Price Resolver
//!
//! Turns a product's [`ProductPricing`] into the figures a product card shows:
//! the price to display, the price to strike through, the discount and which
//! badge (if any) to put on the tile.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::{
    discounts::discount_percent,
    pricing::ProductPricing,
    rules::{PriceRule, nonzero, select_rule},
};

/// Badge shown on a product tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Badge {
    /// Regular sale discount.
    Sale,

    /// Flash sale discount.
    FlashSale,
}

/// Normalized display pricing for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResolution {
    /// Price after regular sale handling, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,

    /// Struck-through reference price.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub original_price: Option<Decimal>,

    /// Whether a regular (non-flash) sale is in effect.
    pub has_sale: bool,

    /// Price to display: the flash price during a flash sale, else `current_price`.
    #[serde(with = "rust_decimal::serde::float")]
    pub display_price: Decimal,

    /// Whether the flash sale badge is shown.
    pub show_flash_sale_badge: bool,

    /// Discount in whole percentage points, `0..=100`.
    pub discount_percent: u8,

    /// Rule that produced `current_price`.
    pub rule: PriceRule,
}

impl PriceResolution {
    /// Badge to render, if any. Flash sales win over regular sales and a
    /// zero discount shows no badge at all.
    pub fn badge(&self) -> Option<Badge> {
        if self.discount_percent == 0 {
            return None;
        }

        if self.show_flash_sale_badge {
            Some(Badge::FlashSale)
        } else if self.has_sale {
            Some(Badge::Sale)
        } else {
            None
        }
    }

    /// Whether the original price should be rendered struck through.
    pub fn shows_original_price(&self) -> bool {
        (self.has_sale || self.show_flash_sale_badge) && nonzero(self.original_price).is_some()
    }
}

/// Resolve display pricing for a product.
///
/// Never fails: missing or unusable inputs resolve to zero prices, no
/// original price, and no discount.
pub fn resolve(pricing: &ProductPricing) -> PriceResolution {
    let flash_sale = pricing.active_flash_sale();
    let has_sale = sale_in_effect(pricing);

    let rule = select_rule(pricing);
    let derivation = rule.derive(pricing, has_sale);

    let current_price = derivation.current.max(Decimal::ZERO);
    let mut original_price = derivation.original;

    let flash_price = flash_sale.and_then(|flash| flash.flash_sale_price);

    let (display_price, show_flash_sale_badge) = match flash_price {
        Some(flash_price) => {
            original_price = nonzero(original_price).or(Some(current_price));

            (flash_price, true)
        }
        None => (current_price, false),
    };

    let discount_percent = match (flash_sale, show_flash_sale_badge) {
        (Some(flash), true) => flash.discount_percentage,
        _ => match nonzero(original_price) {
            Some(original) if has_sale => discount_percent(original, current_price),
            _ => 0,
        },
    };

    debug!(
        rule = rule.name(),
        has_sale,
        flash_sale = show_flash_sale_badge,
        %display_price,
        discount_percent,
        "resolved product pricing"
    );

    PriceResolution {
        current_price,
        original_price,
        has_sale,
        display_price,
        show_flash_sale_badge,
        discount_percent,
        rule,
    }
}

/// Whether a regular sale is in effect.
///
/// An explicit `hasSale` wins. Otherwise a positive sale price must undercut
/// the regular price or the list price. (A base price next to a regular price
/// adds no case of its own: the sale still has to undercut the regular price.)
pub fn sale_in_effect(pricing: &ProductPricing) -> bool {
    if let Some(explicit) = pricing.has_sale {
        return explicit;
    }

    let Some(sale) = pricing.sale_price.filter(|sale| *sale > Decimal::ZERO) else {
        return false;
    };

    let undercuts = |reference: Option<Decimal>| nonzero(reference).is_some_and(|r| sale < r);

    undercuts(pricing.regular_price) || undercuts(pricing.price)
}

impl ProductPricing {
    /// Resolve display pricing, see [`resolve`].
    pub fn resolve(&self) -> PriceResolution {
        resolve(self)
    }
}
