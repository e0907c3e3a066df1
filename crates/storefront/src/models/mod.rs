//! Domain models for the storefront.

pub mod cart;
pub mod catalog;
pub mod session;
pub mod user;

pub use cart::{Cart, CartLine};
pub use catalog::{CatalogItem, ResolvedItem};
pub use session::{CurrentUser, session_keys};
pub use user::User;
