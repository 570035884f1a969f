//! Inventory scan for the alert computation.

use sqlx::PgPool;

use stockwatch_core::{CompanyId, InventoryId, ProductId, Sku, WarehouseId};

use super::RepositoryError;
use crate::models::inventory::InventoryRecord;

/// Internal row type for the inventory scan.
#[derive(Debug, sqlx::FromRow)]
struct InventoryRow {
    inventory_id: i32,
    quantity: i32,
    product_id: i32,
    product_name: String,
    sku: Sku,
    product_type: String,
    warehouse_id: i32,
    warehouse_name: String,
}

impl TryFrom<InventoryRow> for InventoryRecord {
    type Error = RepositoryError;

    fn try_from(row: InventoryRow) -> Result<Self, Self::Error> {
        // The schema checks quantity >= 0; a negative value here means the
        // constraint was dropped or bypassed.
        if row.quantity < 0 {
            return Err(RepositoryError::DataCorruption(format!(
                "inventory {} has negative quantity {}",
                row.inventory_id, row.quantity
            )));
        }

        Ok(Self {
            inventory_id: InventoryId::new(row.inventory_id),
            quantity: row.quantity,
            product_id: ProductId::new(row.product_id),
            product_name: row.product_name,
            sku: row.sku,
            product_type: row.product_type,
            warehouse_id: WarehouseId::new(row.warehouse_id),
            warehouse_name: row.warehouse_name,
        })
    }
}

/// Repository for inventory reads.
pub struct InventoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InventoryRepository<'a> {
    /// Create a new inventory repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every inventory record the company holds, with product and warehouse
    /// context joined in, ordered by inventory id so responses are stable
    /// across identical requests.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the query fails, or
    /// [`RepositoryError::DataCorruption`] if a row carries a negative
    /// quantity.
    pub async fn list_for_company(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<InventoryRecord>, RepositoryError> {
        let rows: Vec<InventoryRow> = sqlx::query_as(
            r"
            SELECT i.id AS inventory_id,
                   i.quantity,
                   p.id AS product_id,
                   p.name AS product_name,
                   p.sku,
                   p.product_type,
                   w.id AS warehouse_id,
                   w.name AS warehouse_name
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            JOIN warehouses w ON w.id = i.warehouse_id
            WHERE w.company_id = $1
            ORDER BY i.id
            ",
        )
        .bind(company_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(InventoryRecord::try_from).collect()
    }
}
