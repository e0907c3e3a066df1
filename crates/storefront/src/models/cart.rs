//! Cart document model.
//!
//! A cart is one JSONB document per owner. The serde representation
//! below is both the persisted document format and the wire format
//! (camelCase, matching the public API).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hemline_core::{ItemRef, LineId, SourceKind, UserId};

use super::catalog::ResolvedItem;

/// One line item in a cart: an item+variant combination and its
/// quantity, plus display snapshots taken from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Assigned at creation, immutable.
    pub id: LineId,
    /// Reference into the catalog collection named by `source`.
    pub item: ItemRef,
    pub source: SourceKind,
    /// Always >= 1; a line that would drop to 0 is removed instead.
    pub quantity: u32,
    /// Empty string means "no variant selected".
    #[serde(default)]
    pub selected_size: String,
    #[serde(default)]
    pub selected_color: String,
    /// Display/audit snapshots copied from the catalog item when the
    /// line was created or last touched. Not live references: the
    /// cart renders even if the catalog item is later edited or
    /// deleted.
    pub price_snapshot: Decimal,
    pub name_snapshot: String,
    #[serde(default)]
    pub image_snapshot: String,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Create a new line from a freshly resolved catalog item.
    #[must_use]
    pub fn new(resolved: &ResolvedItem, quantity: u32, size: String, color: String) -> Self {
        Self {
            id: LineId::generate(),
            item: resolved.item.id,
            source: resolved.source,
            quantity,
            selected_size: size,
            selected_color: color,
            price_snapshot: resolved.item.price,
            name_snapshot: resolved.item.name.clone(),
            image_snapshot: resolved.item.image.clone(),
            added_at: Utc::now(),
        }
    }

    /// Whether this line holds the given item+variant combination.
    ///
    /// Variant selectors compare exactly; `(X, "M", "")` and
    /// `(X, "L", "")` are distinct lines and never merge.
    #[must_use]
    pub fn matches_variant(&self, item: ItemRef, size: &str, color: &str) -> bool {
        self.item == item && self.selected_size == size && self.selected_color == color
    }

    /// Re-sync display fields and source from a fresh resolution.
    ///
    /// Applied on every add that touches an existing line; a line that
    /// is never touched again keeps its original snapshot
    /// indefinitely.
    pub fn refresh_snapshot(&mut self, resolved: &ResolvedItem) {
        self.source = resolved.source;
        self.price_snapshot = resolved.item.price;
        self.name_snapshot = resolved.item.name.clone();
        self.image_snapshot = resolved.item.image.clone();
    }
}

/// One cart per user, created lazily on the first add.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub owner: UserId,
    /// Insertion order of first-added variant.
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// The synthetic empty cart used before any mutation has
    /// persisted one.
    #[must_use]
    pub const fn empty(owner: UserId) -> Self {
        Self {
            owner,
            lines: Vec::new(),
        }
    }

    /// Find the line holding an exact item+variant combination.
    ///
    /// At most one such line exists per cart.
    pub fn line_for_variant_mut(
        &mut self,
        item: ItemRef,
        size: &str,
        color: &str,
    ) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.matches_variant(item, size, color))
    }
}
