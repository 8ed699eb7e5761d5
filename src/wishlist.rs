//! Wishlist
//!
//! Local wishlist bookkeeping for a grid of product cards: which products are
//! wishlisted, and which have a toggle request in flight.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use tracing::{debug, warn};

/// Wishlist entry as returned by the wishlist endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Wishlist entry identifier, needed to delete the entry.
    pub id: String,

    /// Wishlisted product.
    pub product_id: String,
}

/// Payload of the wishlist endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistPayload {
    /// Wishlist entries.
    #[serde(default)]
    pub wishlist_items: Vec<WishlistItem>,
}

/// What a wishlist button press should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistToggle {
    /// Guests cannot keep a wishlist.
    SignInRequired,

    /// A request for this product is still running.
    InFlight,

    /// Add the product.
    Add,

    /// Remove the product. The entry id is unknown when the wishlist was
    /// updated locally without one.
    Remove {
        /// Wishlist entry to delete.
        entry_id: Option<String>,
    },
}

/// Result of a wishlist request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The product was added, creating this entry.
    Added {
        /// New wishlist entry, if the API returned one.
        entry_id: Option<String>,
    },

    /// The product was removed.
    Removed,

    /// The server had nothing to change.
    Unchanged,

    /// The request failed.
    Failed,
}

/// Wishlist membership and in-flight toggles, keyed by product id.
#[derive(Debug, Clone, Default)]
pub struct Wishlist {
    entries: FxHashMap<String, Option<String>>,
    pending: FxHashSet<String>,
}

impl Wishlist {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the wishlist endpoint's entries.
    pub fn from_items(items: impl IntoIterator<Item = WishlistItem>) -> Self {
        Self {
            entries: items
                .into_iter()
                .map(|item| (item.product_id, Some(item.id)))
                .collect(),
            pending: FxHashSet::default(),
        }
    }

    /// Whether the product is wishlisted.
    pub fn contains(&self, product_id: &str) -> bool {
        self.entries.contains_key(product_id)
    }

    /// Whether a toggle for the product is in flight.
    pub fn is_pending(&self, product_id: &str) -> bool {
        self.pending.contains(product_id)
    }

    /// Number of wishlisted products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is wishlisted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Start toggling a product, marking it in flight.
    ///
    /// Returns the request to make. Nothing is marked when the shopper is not
    /// signed in or a request is already running.
    pub fn begin_toggle(&mut self, product_id: &str, authenticated: bool) -> WishlistToggle {
        if !authenticated {
            return WishlistToggle::SignInRequired;
        }

        if !self.pending.insert(product_id.to_string()) {
            return WishlistToggle::InFlight;
        }

        match self.entries.get(product_id) {
            Some(entry_id) => WishlistToggle::Remove {
                entry_id: entry_id.clone(),
            },
            None => WishlistToggle::Add,
        }
    }

    /// Finish a toggle started with [`Wishlist::begin_toggle`].
    ///
    /// The in-flight mark is always cleared; membership only changes on success.
    pub fn finish_toggle(&mut self, product_id: &str, outcome: ToggleOutcome) {
        self.pending.remove(product_id);

        match outcome {
            ToggleOutcome::Added { entry_id } => {
                self.entries.insert(product_id.to_string(), entry_id);
            }
            ToggleOutcome::Removed => {
                self.entries.remove(product_id);
            }
            ToggleOutcome::Unchanged => {
                debug!(product_id, "wishlist unchanged");
            }
            ToggleOutcome::Failed => {
                warn!(product_id, "failed to update wishlist");
            }
        }
    }
}
