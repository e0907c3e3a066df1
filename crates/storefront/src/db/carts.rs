//! Cart document repository.
//!
//! Carts persist as one row per owner with the lines in a JSONB
//! column. `save` is a whole-document upsert: the last writer wins,
//! and no optimistic-concurrency token guards the load-mutate-save
//! cycle (see the cart engine docs for the accepted race).

use sqlx::PgPool;
use sqlx::types::Json;

use hemline_core::UserId;

use super::RepositoryError;
use crate::cart::CartStore;
use crate::models::cart::{Cart, CartLine};

/// Repository for cart documents.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the cart document for a user, if one has ever been saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored document does
    /// not decode.
    pub async fn find_by_owner(&self, owner: UserId) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_scalar::<_, Json<Vec<CartLine>>>(
            "SELECT lines FROM cart WHERE user_id = $1",
        )
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|Json(lines)| Cart { owner, lines }))
    }

    /// Upsert the full cart document keyed by owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails. The
    /// repository does not retry; the caller surfaces the error.
    pub async fn upsert(&self, cart: &Cart) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO cart (user_id, lines)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET lines = EXCLUDED.lines, updated_at = now()
            ",
        )
        .bind(cart.owner)
        .bind(Json(&cart.lines))
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

impl CartStore for CartRepository<'_> {
    async fn load(&self, owner: UserId) -> Result<Option<Cart>, RepositoryError> {
        self.find_by_owner(owner).await
    }

    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        self.upsert(cart).await
    }
}
