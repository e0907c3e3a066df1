//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Catalog (read-only)
//! GET  /products               - Product listing
//! GET  /products/{id}          - Product detail
//! GET  /top-sellers            - Top seller listing
//! GET  /top-sellers/{id}       - Top seller detail
//! GET  /dress-styles           - Dress style listing
//! GET  /dress-styles/{id}      - Dress style detail
//!
//! # Cart (requires auth)
//! GET  /cart                   - Current user's cart
//! POST /cart/add               - Add item (201, merges by variant)
//! POST /cart/decrement         - Decrement/remove a line (200)
//!
//! # Auth
//! POST /auth/register          - Register with email + password
//! POST /auth/login             - Login, sets session cookie
//! POST /auth/logout            - Logout, clears session identity
//! GET  /auth/me                - Current session identity
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/decrement", post(cart::decrement))
}

/// Create the read-only catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list_products))
        .route("/products/{id}", get(catalog::show_product))
        .route("/top-sellers", get(catalog::list_top_sellers))
        .route("/top-sellers/{id}", get(catalog::show_top_seller))
        .route("/dress-styles", get(catalog::list_dress_styles))
        .route("/dress-styles/{id}", get(catalog::show_dress_style))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
}
