//! Low-stock alert computation.
//!
//! The calculator walks every inventory record a company holds and applies
//! three gates in order:
//!
//! 1. **Activity**: records with no negative movement inside the trailing
//!    window are skipped outright, whatever their stock level.
//! 2. **Threshold**: stock at or above the product type's floor is not low.
//! 3. **Velocity**: a zero average daily rate has no depletion trend to
//!    project.
//!
//! Survivors are projected to a whole-day stockout estimate and paired with
//! their primary supplier. Results are assembled fresh per request from
//! three set-based queries; nothing is cached or stored.

use std::collections::BTreeSet;

use sqlx::PgPool;
use tracing::instrument;

use stockwatch_core::{CompanyId, ProductId};

use crate::db::{InventoryRepository, MovementRepository, SupplierRepository};
use crate::error::AppError;
use crate::models::alert::{AlertEntry, AlertResponse, SupplierRef};
use crate::models::inventory::{InventoryRecord, MovementAggregate};
use crate::services::thresholds::ThresholdPolicy;
use crate::services::velocity;

/// Outcome of gating one inventory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Projection {
    threshold: i32,
    days_until_stockout: i64,
}

/// Computes the low-stock alert list for one company.
pub struct AlertCalculator<'a> {
    pool: &'a PgPool,
    policy: &'a ThresholdPolicy,
    window_days: u32,
}

impl<'a> AlertCalculator<'a> {
    /// Create a new calculator borrowing the shared pool and policy.
    #[must_use]
    pub const fn new(pool: &'a PgPool, policy: &'a ThresholdPolicy, window_days: u32) -> Self {
        Self {
            pool,
            policy,
            window_days,
        }
    }

    /// Compute the full alert list for `company_id`.
    ///
    /// Entries come back in inventory scan order (ascending inventory id),
    /// one per qualifying product-warehouse pair. A company with no
    /// inventory yields the empty response, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] if any of the three queries fails.
    /// There are no partial results: one failed query aborts the whole
    /// computation.
    #[instrument(skip(self))]
    pub async fn low_stock_alerts(&self, company_id: CompanyId) -> Result<AlertResponse, AppError> {
        let inventory = InventoryRepository::new(self.pool)
            .list_for_company(company_id)
            .await?;
        if inventory.is_empty() {
            return Ok(AlertResponse::empty());
        }

        let activity = MovementRepository::new(self.pool)
            .outbound_aggregates(company_id, self.window_days)
            .await?;

        let scanned = inventory.len();
        let mut candidates: Vec<(InventoryRecord, Projection)> = Vec::new();
        for record in inventory {
            let aggregate = activity
                .get(&record.inventory_id)
                .copied()
                .unwrap_or_default();
            if let Some(projection) = evaluate(&record, aggregate, self.policy, self.window_days) {
                candidates.push((record, projection));
            }
        }

        if candidates.is_empty() {
            tracing::debug!(scanned, "Low-stock scan found nothing to report");
            return Ok(AlertResponse::empty());
        }

        // Suppliers are fetched for qualifying products only, deduplicated
        // across warehouses.
        let product_ids: Vec<ProductId> = candidates
            .iter()
            .map(|(record, _)| record.product_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let suppliers = SupplierRepository::new(self.pool)
            .primary_for_products(&product_ids)
            .await?;

        let alerts: Vec<AlertEntry> = candidates
            .into_iter()
            .map(|(record, projection)| {
                let supplier = suppliers.get(&record.product_id).cloned();
                build_entry(record, projection, supplier)
            })
            .collect();

        let total_alerts = alerts.len();
        tracing::debug!(scanned, total_alerts, "Low-stock scan complete");

        Ok(AlertResponse {
            alerts,
            total_alerts,
        })
    }
}

/// Run the three gates against one record.
///
/// Returns `None` when any gate excludes the record. The zero-velocity gate
/// compares against exact zero: consistent data cannot produce a zero sum
/// from a nonzero count, but the guard keeps the division below safe either
/// way.
#[allow(clippy::float_cmp)]
fn evaluate(
    record: &InventoryRecord,
    aggregate: MovementAggregate,
    policy: &ThresholdPolicy,
    window_days: u32,
) -> Option<Projection> {
    if !aggregate.has_sales() {
        return None;
    }

    let threshold = policy.resolve(&record.product_type);
    if record.quantity >= threshold {
        return None;
    }

    let daily_rate = velocity::average_daily_sales(aggregate.units_sold, window_days);
    if daily_rate == 0.0 {
        return None;
    }

    Some(Projection {
        threshold,
        days_until_stockout: velocity::days_until_stockout(record.quantity, daily_rate),
    })
}

fn build_entry(
    record: InventoryRecord,
    projection: Projection,
    supplier: Option<SupplierRef>,
) -> AlertEntry {
    AlertEntry {
        product_id: record.product_id,
        product_name: record.product_name,
        sku: record.sku,
        warehouse_id: record.warehouse_id,
        warehouse_name: record.warehouse_name,
        current_stock: record.quantity,
        threshold: projection.threshold,
        days_until_stockout: projection.days_until_stockout,
        supplier,
    }
}
