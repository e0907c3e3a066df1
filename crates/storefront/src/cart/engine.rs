//! Cart mutation engine.
//!
//! Every mutation is a request-scoped load-mutate-save cycle: load the
//! owner's cart document, resolve the referenced catalog item if
//! needed, apply the merge/decrement rule, persist the whole document,
//! and return the resulting cart view.
//!
//! # Concurrency
//!
//! No transaction or compare-and-swap wraps the three steps. Two
//! concurrent mutations for the same user can both load the same prior
//! state and the second save overwrites the first (lost update). That
//! is the accepted contract for a single-user cart under the store's
//! last-writer-wins persistence; this engine must not add locking.

use serde::Serialize;
use thiserror::Error;

use hemline_core::{ItemRef, LineId, SourceKind, UserId};

use crate::db::RepositoryError;
use crate::models::cart::{Cart, CartLine};
use crate::models::catalog::{CatalogItem, ResolvedItem};

/// Read access to the three catalog collections.
///
/// Implementations only supply [`find`](Self::find); the fixed
/// resolution order lives in the provided [`resolve`](Self::resolve)
/// so there is exactly one definition of the tie-break.
#[allow(async_fn_in_trait)]
pub trait CatalogLookup {
    /// Look an item up in one specific collection.
    async fn find(
        &self,
        source: SourceKind,
        item: ItemRef,
    ) -> Result<Option<CatalogItem>, RepositoryError>;

    /// Resolve an item reference against the catalogs in fixed order:
    /// Product, then TopSeller, then DressStyle. First match wins; on
    /// an id collision Product wins silently (a documented
    /// deterministic tie-break). `None` only when no catalog matches.
    async fn resolve(&self, item: ItemRef) -> Result<Option<ResolvedItem>, RepositoryError> {
        for source in SourceKind::RESOLUTION_ORDER {
            if let Some(found) = self.find(source, item).await? {
                return Ok(Some(ResolvedItem {
                    source,
                    item: found,
                }));
            }
        }
        Ok(None)
    }
}

/// Durable per-user cart storage.
///
/// `load` returning `None` means "no cart yet"; reads never create a
/// document. `save` upserts the full document keyed by owner with
/// last-writer-wins semantics and no internal retry.
#[allow(async_fn_in_trait)]
pub trait CartStore {
    async fn load(&self, owner: UserId) -> Result<Option<Cart>, RepositoryError>;
    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError>;
}

/// Errors produced by cart operations.
///
/// All are terminal for the current operation; nothing is retried
/// internally, and a failed operation never leaves a partially
/// mutated document behind.
#[derive(Debug, Error)]
pub enum CartError {
    /// Missing or malformed identifiers in the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The referenced item matches no catalog.
    #[error("item {0} not found in any catalog")]
    ItemNotFound(ItemRef),

    /// The user has no cart document yet (decrement path only).
    #[error("cart not found")]
    CartNotFound,

    /// No line matches the given selector.
    #[error("item not in cart")]
    ItemNotInCart,

    /// Underlying persistence failure.
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// Parameters for an add-to-cart mutation.
#[derive(Debug, Clone)]
pub struct AddItem {
    pub item: ItemRef,
    /// Requested quantity; anything below 1 is coerced to 1.
    pub quantity: i64,
    pub selected_size: String,
    pub selected_color: String,
}

/// How a decrement request names the line to touch.
#[derive(Debug, Clone)]
pub enum LineSelector {
    /// Preferred when the caller knows the line id.
    ById(LineId),
    /// Fallback: exact item+variant match.
    ByVariant {
        item: ItemRef,
        selected_size: String,
        selected_color: String,
    },
}

/// A cart line as returned to clients: the stored line, plus live
/// catalog fields for Product-sourced lines only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLine,
    /// Live catalog data. Populated only when `line.source` is
    /// Product; TopSeller and DressStyle lines render from their
    /// stored snapshots alone. A deliberate asymmetry, not an
    /// oversight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogItem>,
}

/// The cart as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub owner: UserId,
    pub lines: Vec<CartLineView>,
}

/// The cart mutation engine.
///
/// Generic over its two collaborators so the merge semantics can be
/// exercised against in-memory fakes; production wires in the
/// Postgres repositories.
pub struct CartService<C, S> {
    catalog: C,
    store: S,
}

impl<C, S> CartService<C, S>
where
    C: CatalogLookup,
    S: CartStore,
{
    pub const fn new(catalog: C, store: S) -> Self {
        Self { catalog, store }
    }

    /// Add an item to the owner's cart, creating the cart lazily.
    ///
    /// An existing line with the exact same `(item, size, color)`
    /// absorbs the quantity and gets its display snapshots re-synced
    /// from the fresh resolution (refresh-on-touch); otherwise a new
    /// line is appended.
    ///
    /// # Errors
    ///
    /// `CartError::ItemNotFound` if the item matches no catalog (the
    /// stored cart is left untouched, and none is created);
    /// `CartError::Storage` on persistence failure.
    pub async fn add_item(&self, owner: UserId, req: AddItem) -> Result<CartView, CartError> {
        let quantity = u32::try_from(req.quantity).ok().filter(|q| *q >= 1).unwrap_or(1);

        let resolved = self
            .catalog
            .resolve(req.item)
            .await?
            .ok_or(CartError::ItemNotFound(req.item))?;

        let mut cart = self
            .store
            .load(owner)
            .await?
            .unwrap_or_else(|| Cart::empty(owner));

        match cart.line_for_variant_mut(req.item, &req.selected_size, &req.selected_color) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity);
                line.refresh_snapshot(&resolved);
            }
            None => {
                cart.lines.push(CartLine::new(
                    &resolved,
                    quantity,
                    req.selected_size,
                    req.selected_color,
                ));
            }
        }

        self.store.save(&cart).await?;

        tracing::debug!(owner = %owner, item = %req.item, quantity, "added item to cart");

        self.render(cart).await
    }

    /// Decrement a line's quantity by one, removing the line when it
    /// would reach zero. Lines are never persisted at a non-positive
    /// quantity.
    ///
    /// # Errors
    ///
    /// `CartError::CartNotFound` if the user has no cart document;
    /// `CartError::ItemNotInCart` if no line matches the selector;
    /// `CartError::Storage` on persistence failure.
    pub async fn decrement_item(
        &self,
        owner: UserId,
        selector: LineSelector,
    ) -> Result<CartView, CartError> {
        let mut cart = self.store.load(owner).await?.ok_or(CartError::CartNotFound)?;

        let idx = match &selector {
            LineSelector::ById(line_id) => cart.lines.iter().position(|l| l.id == *line_id),
            LineSelector::ByVariant {
                item,
                selected_size,
                selected_color,
            } => cart
                .lines
                .iter()
                .position(|l| l.matches_variant(*item, selected_size, selected_color)),
        }
        .ok_or(CartError::ItemNotInCart)?;

        let Some(line) = cart.lines.get_mut(idx) else {
            return Err(CartError::ItemNotInCart);
        };

        if line.quantity <= 1 {
            cart.lines.remove(idx);
        } else {
            line.quantity -= 1;
        }

        self.store.save(&cart).await?;

        tracing::debug!(owner = %owner, "decremented cart line");

        self.render(cart).await
    }

    /// Pure read: the owner's cart, or the synthetic empty cart if
    /// none exists. Never creates or mutates the stored document.
    ///
    /// # Errors
    ///
    /// `CartError::Storage` on load failure.
    pub async fn get_cart(&self, owner: UserId) -> Result<CartView, CartError> {
        let cart = self
            .store
            .load(owner)
            .await?
            .unwrap_or_else(|| Cart::empty(owner));
        self.render(cart).await
    }

    /// Attach live catalog fields to Product-sourced lines.
    ///
    /// A view concern only: enrichment reads the primary catalog and
    /// never writes back. A Product line whose item has since been
    /// deleted simply renders without live data, from its snapshots.
    async fn render(&self, cart: Cart) -> Result<CartView, CartError> {
        let mut lines = Vec::with_capacity(cart.lines.len());
        for line in cart.lines {
            let catalog = if line.source == SourceKind::Product {
                self.catalog.find(SourceKind::Product, line.item).await?
            } else {
                None
            };
            lines.push(CartLineView { line, catalog });
        }
        Ok(CartView {
            owner: cart.owner,
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use super::*;

    #[derive(Default)]
    struct MemCatalog {
        entries: Mutex<HashMap<(SourceKind, ItemRef), CatalogItem>>,
    }

    impl MemCatalog {
        fn insert(&self, source: SourceKind, id: i32, name: &str, price: i64) {
            let item = ItemRef::new(id);
            self.entries.lock().expect("lock").insert(
                (source, item),
                CatalogItem {
                    id: item,
                    name: name.to_owned(),
                    price: Decimal::new(price, 0),
                    image: format!("{name}.jpg"),
                },
            );
        }

        fn set_price(&self, source: SourceKind, id: i32, price: i64) {
            let mut entries = self.entries.lock().expect("lock");
            let entry = entries
                .get_mut(&(source, ItemRef::new(id)))
                .expect("item present");
            entry.price = Decimal::new(price, 0);
        }

        fn remove(&self, source: SourceKind, id: i32) {
            self.entries
                .lock()
                .expect("lock")
                .remove(&(source, ItemRef::new(id)));
        }
    }

    impl CatalogLookup for &MemCatalog {
        async fn find(
            &self,
            source: SourceKind,
            item: ItemRef,
        ) -> Result<Option<CatalogItem>, RepositoryError> {
            Ok(self.entries.lock().expect("lock").get(&(source, item)).cloned())
        }
    }

    #[derive(Default)]
    struct MemStore {
        carts: Mutex<HashMap<i32, Cart>>,
    }

    impl MemStore {
        fn cart_count(&self) -> usize {
            self.carts.lock().expect("lock").len()
        }
    }

    impl CartStore for &MemStore {
        async fn load(&self, owner: UserId) -> Result<Option<Cart>, RepositoryError> {
            Ok(self.carts.lock().expect("lock").get(&owner.as_i32()).cloned())
        }

        async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
            self.carts
                .lock()
                .expect("lock")
                .insert(cart.owner.as_i32(), cart.clone());
            Ok(())
        }
    }

    fn add(item: i32, quantity: i64, size: &str, color: &str) -> AddItem {
        AddItem {
            item: ItemRef::new(item),
            quantity,
            selected_size: size.to_owned(),
            selected_color: color.to_owned(),
        }
    }

    const OWNER: UserId = UserId::new(1);

    #[tokio::test]
    async fn first_add_creates_one_line_with_requested_quantity() {
        let catalog = MemCatalog::default();
        catalog.insert(SourceKind::Product, 1, "shirt", 100);
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        let view = service.add_item(OWNER, add(1, 3, "M", "")).await.expect("add");

        assert_eq!(view.lines.len(), 1);
        let line = &view.lines[0].line;
        assert_eq!(line.quantity, 3);
        assert_eq!(line.source, SourceKind::Product);
        assert_eq!(line.name_snapshot, "shirt");
        assert_eq!(line.price_snapshot, Decimal::new(100, 0));
    }

    #[tokio::test]
    async fn nonpositive_quantity_is_coerced_to_one() {
        let catalog = MemCatalog::default();
        catalog.insert(SourceKind::Product, 1, "shirt", 100);
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        let view = service.add_item(OWNER, add(1, 0, "", "")).await.expect("add");
        assert_eq!(view.lines[0].line.quantity, 1);

        let view = service.add_item(OWNER, add(1, -4, "", "")).await.expect("add");
        assert_eq!(view.lines[0].line.quantity, 2);
    }

    #[tokio::test]
    async fn repeated_adds_accumulate_on_one_line() {
        let catalog = MemCatalog::default();
        catalog.insert(SourceKind::Product, 1, "shirt", 100);
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        service.add_item(OWNER, add(1, 2, "M", "red")).await.expect("add");
        let view = service.add_item(OWNER, add(1, 3, "M", "red")).await.expect("add");

        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].line.quantity, 5);
    }

    #[tokio::test]
    async fn different_variants_never_merge() {
        let catalog = MemCatalog::default();
        catalog.insert(SourceKind::Product, 1, "shirt", 100);
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        service.add_item(OWNER, add(1, 1, "M", "")).await.expect("add");
        let view = service.add_item(OWNER, add(1, 1, "L", "")).await.expect("add");

        assert_eq!(view.lines.len(), 2);
        assert_ne!(view.lines[0].line.id, view.lines[1].line.id);
    }

    #[tokio::test]
    async fn resolution_order_prefers_product_on_collision() {
        let catalog = MemCatalog::default();
        catalog.insert(SourceKind::Product, 1, "shirt", 100);
        catalog.insert(SourceKind::TopSeller, 1, "bestseller", 0);
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        let view = service.add_item(OWNER, add(1, 1, "", "")).await.expect("add");
        assert_eq!(view.lines[0].line.source, SourceKind::Product);
        assert_eq!(view.lines[0].line.name_snapshot, "shirt");
    }

    #[tokio::test]
    async fn unknown_item_fails_without_creating_a_cart() {
        let catalog = MemCatalog::default();
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        let err = service.add_item(OWNER, add(42, 1, "", "")).await.expect_err("miss");
        assert!(matches!(err, CartError::ItemNotFound(_)));
        assert_eq!(store.cart_count(), 0);
    }

    #[tokio::test]
    async fn decrement_removes_line_at_quantity_one() {
        let catalog = MemCatalog::default();
        catalog.insert(SourceKind::Product, 1, "shirt", 100);
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        service.add_item(OWNER, add(1, 1, "M", "")).await.expect("add");
        let view = service
            .decrement_item(
                OWNER,
                LineSelector::ByVariant {
                    item: ItemRef::new(1),
                    selected_size: "M".to_owned(),
                    selected_color: String::new(),
                },
            )
            .await
            .expect("decrement");

        assert!(view.lines.is_empty());

        let after = service.get_cart(OWNER).await.expect("get");
        assert!(after.lines.is_empty());
    }

    #[tokio::test]
    async fn decrement_by_line_id_lowers_quantity() {
        let catalog = MemCatalog::default();
        catalog.insert(SourceKind::Product, 1, "shirt", 100);
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        let view = service.add_item(OWNER, add(1, 3, "", "")).await.expect("add");
        let line_id = view.lines[0].line.id;

        let view = service
            .decrement_item(OWNER, LineSelector::ById(line_id))
            .await
            .expect("decrement");

        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].line.quantity, 2);
        assert_eq!(view.lines[0].line.id, line_id);
    }

    #[tokio::test]
    async fn decrement_misses_report_the_right_errors() {
        let catalog = MemCatalog::default();
        catalog.insert(SourceKind::Product, 1, "shirt", 100);
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        // No cart document at all.
        let err = service
            .decrement_item(OWNER, LineSelector::ById(LineId::generate()))
            .await
            .expect_err("no cart");
        assert!(matches!(err, CartError::CartNotFound));

        // Cart exists, line doesn't.
        service.add_item(OWNER, add(1, 1, "", "")).await.expect("add");
        let err = service
            .decrement_item(OWNER, LineSelector::ById(LineId::generate()))
            .await
            .expect_err("wrong line");
        assert!(matches!(err, CartError::ItemNotInCart));
    }

    #[tokio::test]
    async fn untouched_snapshot_survives_catalog_edits_until_next_add() {
        let catalog = MemCatalog::default();
        catalog.insert(SourceKind::Product, 1, "shirt", 100);
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        service.add_item(OWNER, add(1, 1, "", "")).await.expect("add");

        catalog.set_price(SourceKind::Product, 1, 150);

        // Untouched line keeps the old snapshot.
        let view = service.get_cart(OWNER).await.expect("get");
        assert_eq!(view.lines[0].line.price_snapshot, Decimal::new(100, 0));
        // ...while the live enrichment already shows the new price.
        assert_eq!(
            view.lines[0].catalog.as_ref().expect("enriched").price,
            Decimal::new(150, 0)
        );

        // A second add refreshes the snapshot and accumulates.
        let view = service.add_item(OWNER, add(1, 1, "", "")).await.expect("add");
        assert_eq!(view.lines[0].line.quantity, 2);
        assert_eq!(view.lines[0].line.price_snapshot, Decimal::new(150, 0));
    }

    #[tokio::test]
    async fn enrichment_is_product_only_and_tolerates_deletion() {
        let catalog = MemCatalog::default();
        catalog.insert(SourceKind::Product, 1, "shirt", 100);
        catalog.insert(SourceKind::TopSeller, 2, "bestseller", 0);
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        service.add_item(OWNER, add(1, 1, "", "")).await.expect("add product");
        let view = service.add_item(OWNER, add(2, 1, "", "")).await.expect("add topseller");

        assert!(view.lines[0].catalog.is_some());
        assert!(view.lines[1].catalog.is_none());
        assert_eq!(view.lines[1].line.source, SourceKind::TopSeller);

        // Deleting the product leaves the line rendering from its
        // snapshot, without live data.
        catalog.remove(SourceKind::Product, 1);
        let view = service.get_cart(OWNER).await.expect("get");
        assert!(view.lines[0].catalog.is_none());
        assert_eq!(view.lines[0].line.name_snapshot, "shirt");
    }

    #[tokio::test]
    async fn get_cart_without_document_returns_empty_view() {
        let catalog = MemCatalog::default();
        let store = MemStore::default();
        let service = CartService::new(&catalog, &store);

        let view = service.get_cart(OWNER).await.expect("get");
        assert_eq!(view.owner, OWNER);
        assert!(view.lines.is_empty());
        assert_eq!(store.cart_count(), 0);
    }
}
