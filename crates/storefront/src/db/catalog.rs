//! Catalog repository for the three read-only collections.
//!
//! All queries are runtime-checked (`query_as` with binds); the
//! storefront never writes to these tables.

use sqlx::PgPool;

use hemline_core::{ItemRef, SourceKind};

use super::RepositoryError;
use crate::cart::CatalogLookup;
use crate::models::catalog::{CatalogEntry, CatalogItem};

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The `SELECT` list for one collection.
    ///
    /// `top_seller` has no price column; it selects a NULL price so
    /// all three collections decode into the same row shape.
    const fn select_sql(source: SourceKind) -> &'static str {
        match source {
            SourceKind::Product => "SELECT id, name, description, price, image FROM product",
            SourceKind::TopSeller => {
                "SELECT id, name, description, NULL::numeric AS price, image FROM top_seller"
            }
            SourceKind::DressStyle => {
                "SELECT id, name, description, price, image FROM dress_style"
            }
        }
    }

    /// Fetch one entry from a specific collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_entry(
        &self,
        source: SourceKind,
        item: ItemRef,
    ) -> Result<Option<CatalogEntry>, RepositoryError> {
        let sql = format!("{} WHERE id = $1", Self::select_sql(source));
        let row = sqlx::query_as::<_, CatalogEntry>(&sql)
            .bind(item)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// List all entries of a collection in id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, source: SourceKind) -> Result<Vec<CatalogEntry>, RepositoryError> {
        let sql = format!("{} ORDER BY id", Self::select_sql(source));
        let rows = sqlx::query_as::<_, CatalogEntry>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }
}

impl CatalogLookup for CatalogRepository<'_> {
    async fn find(
        &self,
        source: SourceKind,
        item: ItemRef,
    ) -> Result<Option<CatalogItem>, RepositoryError> {
        Ok(self
            .get_entry(source, item)
            .await?
            .map(CatalogEntry::into_item))
    }
}
