//! Shopping cart: consolidation and mutation engine.
//!
//! The engine sits between the HTTP layer and the datastore: it
//! resolves the referenced catalog item, applies the merge/decrement
//! rule against the user's cart document, persists, and returns the
//! resulting cart. See [`engine::CartService`] for the operation
//! contracts.

pub mod engine;

pub use engine::{
    AddItem, CartError, CartLineView, CartService, CartStore, CartView, CatalogLookup,
    LineSelector,
};

/// Permissive numeric coercion for quantity-like JSON fields.
///
/// The public API never rejects a quantity: a missing, non-numeric,
/// fractional-below-one, or non-positive value becomes 1. A tested
/// default-substitution rule, not a validation error.
#[must_use]
pub fn coerce_quantity(raw: Option<&serde_json::Value>) -> i64 {
    use serde_json::Value;

    let parsed = match raw {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().map(|f| f.trunc() as i64)),
        Some(_) => None,
    };

    match parsed {
        Some(q) if q >= 1 => q,
        _ => 1,
    }
}
