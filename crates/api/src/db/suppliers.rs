//! Supplier lookup for alerting products.

use std::collections::HashMap;

use sqlx::PgPool;

use stockwatch_core::{Email, ProductId, SupplierId};

use super::RepositoryError;
use crate::models::alert::SupplierRef;

#[derive(Debug, sqlx::FromRow)]
struct SupplierRow {
    product_id: i32,
    supplier_id: i32,
    name: String,
    contact_email: Email,
}

/// Repository for supplier reads.
pub struct SupplierRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SupplierRepository<'a> {
    /// Create a new supplier repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The primary supplier for each of the given products.
    ///
    /// A product linked to several suppliers resolves to the one with the
    /// lowest supplier id, so repeated requests name the same contact.
    /// Products with no link are absent from the map.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the query fails.
    pub async fn primary_for_products(
        &self,
        product_ids: &[ProductId],
    ) -> Result<HashMap<ProductId, SupplierRef>, RepositoryError> {
        let ids: Vec<i32> = product_ids.iter().map(|id| id.as_i32()).collect();

        let rows: Vec<SupplierRow> = sqlx::query_as(
            r"
            SELECT DISTINCT ON (ps.product_id)
                   ps.product_id,
                   s.id AS supplier_id,
                   s.name,
                   s.contact_email
            FROM product_suppliers ps
            JOIN suppliers s ON s.id = ps.supplier_id
            WHERE ps.product_id = ANY($1)
            ORDER BY ps.product_id, s.id
            ",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    ProductId::new(row.product_id),
                    SupplierRef {
                        id: SupplierId::new(row.supplier_id),
                        name: row.name,
                        contact_email: row.contact_email,
                    },
                )
            })
            .collect())
    }
}
