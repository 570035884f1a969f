//! Core types for Stockwatch.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod sku;

pub use email::{Email, EmailError};
pub use id::*;
pub use sku::{Sku, SkuError};
