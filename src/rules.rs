//! Price Rules
//!
//! The current price of a product is derived by the first rule in
//! [`PRICE_RULES`] whose predicate matches the available price fields.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::pricing::ProductPricing;

/// Rules in evaluation order. [`PriceRule::Fallback`] always matches.
pub const PRICE_RULES: [PriceRule; 3] = [
    PriceRule::BaseAgainstRegular,
    PriceRule::SaleAgainstList,
    PriceRule::Fallback,
];

/// A named step of the current-price derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceRule {
    /// Both `basePrice` and `regularPrice` are known.
    ///
    /// The base price is always the current price; the regular price is
    /// struck through only when the product is on sale and undercut.
    BaseAgainstRegular,

    /// A `salePrice` is known together with `price` or `basePrice`.
    SaleAgainstList,

    /// Whatever price is available, sale price first when on sale.
    Fallback,
}

/// Output of a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derivation {
    /// Price the product currently sells for.
    pub current: Decimal,

    /// Reference price to strike through, if any.
    pub original: Option<Decimal>,
}

impl Derivation {
    fn current(current: Decimal) -> Self {
        Self {
            current,
            original: None,
        }
    }
}

impl PriceRule {
    /// Short, stable rule name.
    pub fn name(self) -> &'static str {
        match self {
            PriceRule::BaseAgainstRegular => "base-against-regular",
            PriceRule::SaleAgainstList => "sale-against-list",
            PriceRule::Fallback => "fallback",
        }
    }

    /// Whether this rule handles the given pricing.
    pub fn applies(self, pricing: &ProductPricing) -> bool {
        match self {
            PriceRule::BaseAgainstRegular => {
                pricing.base_price.is_some() && pricing.regular_price.is_some()
            }
            PriceRule::SaleAgainstList => {
                pricing.sale_price.is_some()
                    && (pricing.price.is_some() || pricing.base_price.is_some())
            }
            PriceRule::Fallback => true,
        }
    }

    /// Derive current and original prices.
    ///
    /// Rules assume [`PriceRule::applies`] holds; a rule applied to pricing it
    /// does not handle degrades to a zero current price.
    pub fn derive(self, pricing: &ProductPricing, on_sale: bool) -> Derivation {
        match self {
            PriceRule::BaseAgainstRegular => base_against_regular(pricing, on_sale),
            PriceRule::SaleAgainstList => sale_against_list(pricing, on_sale),
            PriceRule::Fallback => fallback(pricing, on_sale),
        }
    }
}

impl fmt::Display for PriceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First rule matching the pricing.
pub fn select_rule(pricing: &ProductPricing) -> PriceRule {
    PRICE_RULES
        .into_iter()
        .find(|rule| rule.applies(pricing))
        .unwrap_or(PriceRule::Fallback)
}

fn base_against_regular(pricing: &ProductPricing, on_sale: bool) -> Derivation {
    let (Some(base), Some(regular)) = (pricing.base_price, pricing.regular_price) else {
        return Derivation::current(Decimal::ZERO);
    };

    if on_sale && base < regular {
        Derivation {
            current: base,
            original: Some(regular),
        }
    } else {
        Derivation::current(base)
    }
}

fn sale_against_list(pricing: &ProductPricing, on_sale: bool) -> Derivation {
    match nonzero(pricing.sale_price) {
        Some(sale) if on_sale => Derivation {
            current: sale,
            original: [pricing.price, pricing.base_price, pricing.regular_price]
                .into_iter()
                .flatten()
                .find(|reference| !reference.is_zero() && *reference > sale),
        },
        _ => Derivation::current(
            first_nonzero([pricing.price, pricing.base_price, pricing.regular_price])
                .unwrap_or(Decimal::ZERO),
        ),
    }
}

fn fallback(pricing: &ProductPricing, on_sale: bool) -> Derivation {
    match nonzero(pricing.sale_price) {
        Some(sale) if on_sale => Derivation {
            current: sale,
            original: first_nonzero([pricing.regular_price, pricing.price, pricing.base_price]),
        },
        _ => Derivation::current(
            first_nonzero([
                pricing.base_price,
                pricing.regular_price,
                pricing.price,
                pricing.sale_price,
            ])
            .unwrap_or(Decimal::ZERO),
        ),
    }
}

/// Zero counts as "no value" when picking between candidate prices.
pub(crate) fn nonzero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

fn first_nonzero<const N: usize>(candidates: [Option<Decimal>; N]) -> Option<Decimal> {
    candidates.into_iter().find_map(nonzero)
}
