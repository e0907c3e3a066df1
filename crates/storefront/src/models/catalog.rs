//! Catalog read models.
//!
//! The catalog collections are read-only from the storefront's point
//! of view: the cart engine only copies snapshots out of them.

use rust_decimal::Decimal;
use serde::Serialize;

use hemline_core::{ItemRef, SourceKind};

/// Normalized view of one catalog item, identical in shape across the
/// three collections.
///
/// Top sellers carry no price in their collection; their price
/// normalizes to zero here, and that zero is what gets snapshotted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: ItemRef,
    pub name: String,
    pub price: Decimal,
    pub image: String,
}

/// A catalog item together with the collection it was found in.
#[derive(Debug, Clone)]
pub struct ResolvedItem {
    pub source: SourceKind,
    pub item: CatalogItem,
}

/// Full listing row for the read-only catalog endpoints.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: ItemRef,
    pub name: String,
    pub description: String,
    /// NULL for top sellers, which have no price column.
    pub price: Option<Decimal>,
    /// Nullable in all three tables.
    pub image: Option<String>,
}

impl CatalogEntry {
    /// Normalize to the snapshot shape the cart engine consumes.
    ///
    /// Missing price and image become zero and the empty string, so a
    /// sparse catalog row never fails a cart operation.
    #[must_use]
    pub fn into_item(self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            name: self.name,
            price: self.price.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
        }
    }
}
