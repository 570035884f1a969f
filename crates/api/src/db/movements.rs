//! Movement aggregates over the trailing sales window.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use sqlx::PgPool;

use stockwatch_core::{CompanyId, InventoryId};

use super::RepositoryError;
use crate::models::inventory::MovementAggregate;

#[derive(Debug, sqlx::FromRow)]
struct MovementTotalsRow {
    inventory_id: i32,
    sale_count: i64,
    units_sold: i64,
}

/// Repository for movement reads.
pub struct MovementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MovementRepository<'a> {
    /// Create a new movement repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count and total magnitude of negative movements per inventory record
    /// across the whole company, over the trailing `window_days`.
    ///
    /// Both aggregates come from one query, so they always describe the
    /// same window. Records without any negative movement in the window are
    /// absent from the map; positive movements never count toward sales.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the query fails.
    pub async fn outbound_aggregates(
        &self,
        company_id: CompanyId,
        window_days: u32,
    ) -> Result<HashMap<InventoryId, MovementAggregate>, RepositoryError> {
        let since = Utc::now() - Duration::days(i64::from(window_days));

        let rows: Vec<MovementTotalsRow> = sqlx::query_as(
            r"
            SELECT m.inventory_id,
                   COUNT(*) AS sale_count,
                   ABS(SUM(m.change_quantity))::BIGINT AS units_sold
            FROM inventory_movements m
            JOIN inventory i ON i.id = m.inventory_id
            JOIN warehouses w ON w.id = i.warehouse_id
            WHERE w.company_id = $1
              AND m.change_quantity < 0
              AND m.created_at >= $2
            GROUP BY m.inventory_id
            ",
        )
        .bind(company_id)
        .bind(since)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    InventoryId::new(row.inventory_id),
                    MovementAggregate {
                        sale_count: row.sale_count,
                        units_sold: row.units_sold,
                    },
                )
            })
            .collect())
    }
}
