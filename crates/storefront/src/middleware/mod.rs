//! Middleware for the storefront.

pub mod auth;
pub mod session;

pub use auth::{OptionalUser, RequireUser, clear_current_user, set_current_user};
pub use session::create_session_layer;
