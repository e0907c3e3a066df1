//! Cart route handlers.
//!
//! Thin pass-through over the cart mutation engine: deserialize,
//! resolve the session identity, call the engine, serialize. All
//! semantics live in [`crate::cart::engine`].

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use hemline_core::{ItemRef, LineId};

use crate::cart::{AddItem, CartError, CartView, LineSelector, coerce_quantity};
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::state::AppState;

/// Add-to-cart request body.
///
/// `quantity` is deliberately untyped: the API accepts numbers,
/// numeric strings, or garbage, and coerces anything unusable to 1.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub item_id: ItemRef,
    #[serde(default)]
    pub quantity: Option<serde_json::Value>,
    #[serde(default)]
    pub selected_size: String,
    #[serde(default)]
    pub selected_color: String,
}

/// Decrement request body: a line id, or an item+variant fallback.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecrementRequest {
    pub line_id: Option<LineId>,
    pub item_id: Option<ItemRef>,
    #[serde(default)]
    pub selected_size: String,
    #[serde(default)]
    pub selected_color: String,
}

impl DecrementRequest {
    /// `lineId` wins when both identifiers are supplied.
    fn into_selector(self) -> std::result::Result<LineSelector, CartError> {
        if let Some(line_id) = self.line_id {
            return Ok(LineSelector::ById(line_id));
        }
        if let Some(item) = self.item_id {
            return Ok(LineSelector::ByVariant {
                item,
                selected_size: self.selected_size,
                selected_color: self.selected_color,
            });
        }
        Err(CartError::InvalidRequest(
            "lineId or itemId is required".to_owned(),
        ))
    }
}

/// Get the current user's cart.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn show(State(state): State<AppState>, user: RequireUser) -> Result<Json<CartView>> {
    let view = state.cart_service().get_cart(user.0.id).await?;
    Ok(Json(view))
}

/// Add an item to the current user's cart.
#[instrument(skip(state, user, body), fields(user_id = %user.0.id))]
pub async fn add(
    State(state): State<AppState>,
    user: RequireUser,
    Json(body): Json<AddToCartRequest>,
) -> Result<impl IntoResponse> {
    let request = AddItem {
        item: body.item_id,
        quantity: coerce_quantity(body.quantity.as_ref()),
        selected_size: body.selected_size,
        selected_color: body.selected_color,
    };

    let view = state.cart_service().add_item(user.0.id, request).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Decrement a line in the current user's cart.
#[instrument(skip(state, user, body), fields(user_id = %user.0.id))]
pub async fn decrement(
    State(state): State<AppState>,
    user: RequireUser,
    Json(body): Json<DecrementRequest>,
) -> Result<Json<CartView>> {
    let selector = body.into_selector()?;
    let view = state
        .cart_service()
        .decrement_item(user.0.id, selector)
        .await?;
    Ok(Json(view))
}
