//! Inventory domain models.

use stockwatch_core::{InventoryId, ProductId, Sku, WarehouseId};

/// One product held at one warehouse, snapshotted for a single computation.
///
/// `quantity` is non-negative; the schema enforces this with a check
/// constraint and the repository rejects rows that violate it.
#[derive(Debug, Clone)]
pub struct InventoryRecord {
    pub inventory_id: InventoryId,
    pub quantity: i32,
    pub product_id: ProductId,
    pub product_name: String,
    pub sku: Sku,
    pub product_type: String,
    pub warehouse_id: WarehouseId,
    pub warehouse_name: String,
}

/// Summary of outbound movements for one inventory record over the trailing
/// sales window. Derived fresh on every request, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementAggregate {
    /// Number of negative movements in the window.
    pub sale_count: i64,
    /// Total units moved out: the absolute value of the summed negative
    /// movement quantities.
    pub units_sold: i64,
}

impl MovementAggregate {
    /// Whether the record saw any outbound movement in the window.
    #[must_use]
    pub const fn has_sales(&self) -> bool {
        self.sale_count > 0
    }
}
