//! Integration tests for Hemline.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p hemline-cli -- migrate
//! cargo run -p hemline-cli -- seed
//!
//! # Start the storefront
//! cargo run -p hemline-storefront
//!
//! # Run integration tests against it
//! cargo test -p hemline-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart mutation and read flows
//! - `storefront_auth` - Registration, login, session lifecycle
//!
//! Tests are `#[ignore]`d by default because they need a live server
//! and a seeded database.
