//! Product Card
//!
//! Decisions a product tile makes on top of the resolved pricing: whether the
//! shopper may see prices at all, which badge to show, and what the "add to
//! bag" button should do.

use serde::Deserialize;
use tracing::warn;

use crate::{
    catalog::{ApiResponse, CatalogProduct},
    resolver::{Badge, PriceResolution},
};

/// Store-wide price visibility settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceVisibility {
    /// Hide prices from shoppers who are not signed in.
    #[serde(default)]
    pub hide_prices_for_guests: bool,
}

impl PriceVisibility {
    /// Settings to use after fetching them from the catalog.
    ///
    /// A failed fetch falls back to showing prices; an unsuccessful response
    /// leaves the settings unknown.
    pub fn from_fetch<E>(fetched: Result<ApiResponse<Self>, E>) -> Option<Self>
    where
        E: std::fmt::Display,
    {
        match fetched {
            Ok(response) if response.success => response.data,
            Ok(_) => None,
            Err(err) => {
                warn!(%err, "failed to fetch price visibility settings");

                Some(Self::default())
            }
        }
    }
}

/// Whether prices are shown. Unknown settings show prices.
pub fn shows_price(settings: Option<&PriceVisibility>, authenticated: bool) -> bool {
    authenticated || !settings.is_some_and(|s| s.hide_prices_for_guests)
}

/// What the "add to bag" button does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartIntent {
    /// Prices are hidden; the shopper has to sign in first.
    SignInRequired,

    /// No variant to add; send the shopper to the product page.
    SelectOptions {
        /// Product slug.
        slug: String,
    },

    /// Add a variant to the cart.
    Add {
        /// Variant identifier.
        variant_id: String,

        /// Quantity to add.
        quantity: u32,
    },
}

/// Everything a product tile needs to render its price area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView {
    /// Resolved pricing.
    pub pricing: PriceResolution,

    /// Whether prices may be shown.
    pub price_visible: bool,

    /// Badge to render.
    pub badge: Option<Badge>,

    /// Whether the original price is struck through.
    pub shows_original_price: bool,
}

impl CatalogProduct {
    /// Build the price area of this product's tile.
    pub fn card_view(&self, settings: Option<&PriceVisibility>, authenticated: bool) -> CardView {
        let pricing = self.pricing.resolve();

        CardView {
            pricing,
            price_visible: shows_price(settings, authenticated),
            badge: pricing.badge(),
            shows_original_price: pricing.shows_original_price(),
        }
    }

    /// Decide what "add to bag" does for this product.
    pub fn cart_intent(&self, price_visible: bool) -> CartIntent {
        if !price_visible {
            return CartIntent::SignInRequired;
        }

        match self.default_variant() {
            Some(variant) => CartIntent::Add {
                variant_id: variant.id.clone(),
                quantity: 1,
            },
            None => CartIntent::SelectOptions {
                slug: self.slug.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn product(value: serde_json::Value) -> Result<CatalogProduct, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn guests_see_prices_unless_hidden() {
        let hidden = PriceVisibility {
            hide_prices_for_guests: true,
        };

        assert!(shows_price(None, false), "unknown settings show prices");
        assert!(shows_price(Some(&PriceVisibility::default()), false), "visible by default");
        assert!(!shows_price(Some(&hidden), false), "guests cannot see hidden prices");
        assert!(shows_price(Some(&hidden), true), "signed-in shoppers always see prices");
    }

    #[test]
    fn visibility_fetch_outcomes() {
        let ok: Result<ApiResponse<PriceVisibility>, String> = Ok(ApiResponse {
            success: true,
            data: Some(PriceVisibility {
                hide_prices_for_guests: true,
            }),
        });
        let unsuccessful: Result<ApiResponse<PriceVisibility>, String> = Ok(ApiResponse {
            success: false,
            data: None,
        });
        let failed: Result<ApiResponse<PriceVisibility>, String> = Err("timeout".to_string());

        assert_eq!(
            PriceVisibility::from_fetch(ok),
            Some(PriceVisibility {
                hide_prices_for_guests: true
            })
        );
        assert_eq!(PriceVisibility::from_fetch(unsuccessful), None);
        assert_eq!(
            PriceVisibility::from_fetch(failed),
            Some(PriceVisibility::default())
        );
    }

    #[test]
    fn cart_intent_uses_first_variant() -> TestResult {
        let product = product(json!({
            "id": "p1",
            "slug": "tee",
            "variants": [{"id": "v1"}, {"id": "v2"}],
        }))?;

        assert_eq!(
            product.cart_intent(true),
            CartIntent::Add {
                variant_id: "v1".to_string(),
                quantity: 1,
            }
        );
        assert_eq!(product.cart_intent(false), CartIntent::SignInRequired);

        Ok(())
    }

    #[test]
    fn cart_intent_without_variants_asks_for_options() -> TestResult {
        let product = product(json!({"id": "p1", "slug": "tee"}))?;

        assert_eq!(
            product.cart_intent(true),
            CartIntent::SelectOptions {
                slug: "tee".to_string()
            }
        );

        Ok(())
    }

    #[test]
    fn card_view_combines_pricing_and_visibility() -> TestResult {
        let product = product(json!({
            "id": "p1",
            "regularPrice": 100,
            "salePrice": 80,
        }))?;
        let hidden = PriceVisibility {
            hide_prices_for_guests: true,
        };

        let guest = product.card_view(Some(&hidden), false);
        let member = product.card_view(Some(&hidden), true);

        assert!(!guest.price_visible, "guest prices are hidden");
        assert!(member.price_visible, "member prices are shown");
        assert_eq!(member.badge, Some(Badge::Sale));
        assert!(member.shows_original_price, "regular price is struck through");
        assert_eq!(member.pricing.discount_percent, 20);

        Ok(())
    }
}
