//! Database access for the alert service.
//!
//! # Tables
//!
//! - `companies` - tenant roots; everything else hangs off one
//! - `warehouses` - owned by a company
//! - `products` - global catalog (name, sku, `product_type`)
//! - `inventory` - quantity of one product at one warehouse
//! - `inventory_movements` - signed quantity deltas; negative means outbound
//! - `suppliers` / `product_suppliers` - reorder contacts per product
//!
//! # Repository Pattern
//!
//! Each repository borrows the pool and exposes the set-based reads the
//! alert computation needs. One request issues at most three queries; the
//! per-record work happens in Rust.

pub mod inventory;
pub mod movements;
pub mod suppliers;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use inventory::InventoryRepository;
pub use movements::MovementRepository;
pub use suppliers::SupplierRepository;

/// Errors that can occur during repository operations.
///
/// Callers of the HTTP API never see these distinctions; they collapse to
/// one opaque response at the error boundary. The split exists for logs and
/// error tracking.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx (connectivity, query, decode).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row violates an invariant the schema is supposed to enforce.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
