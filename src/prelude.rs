//! Card Pricing prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    card::{CardView, CartIntent, PriceVisibility, shows_price},
    catalog::{ApiResponse, CatalogError, CatalogProduct, Variant},
    pricing::{FlashSale, ProductPricing},
    resolver::{Badge, PriceResolution, resolve},
    rules::{PRICE_RULES, PriceRule},
    wishlist::{ToggleOutcome, Wishlist, WishlistItem, WishlistPayload, WishlistToggle},
};
