//! Storefront user model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use hemline_core::{Email, UserId};

/// A registered storefront user.
///
/// Password hashes live in their own table and never appear on this
/// struct.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}
