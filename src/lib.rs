//! Card Pricing
//!
//! Display-price resolution for storefront product cards: coerces loosely
//! typed catalog pricing, derives current, original and flash-sale prices,
//! and the discount and badge a product tile shows.

pub mod card;
pub mod catalog;
pub mod coercion;
pub mod discounts;
pub mod prelude;
pub mod pricing;
pub mod report;
pub mod resolver;
pub mod rules;
pub mod wishlist;
