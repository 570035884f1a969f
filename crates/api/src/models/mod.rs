//! Domain models for the alert service.
//!
//! Split between `inventory` (rows read from the database, plus the
//! per-record movement summary) and `alert` (the wire types returned to
//! callers).

pub mod alert;
pub mod inventory;

pub use alert::{AlertEntry, AlertResponse, SupplierRef};
pub use inventory::{InventoryRecord, MovementAggregate};
