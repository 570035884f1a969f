//! Business logic for the alert service.
//!
//! `thresholds` and `velocity` are pure policy, unit-tested without a
//! database. `alerts` orchestrates them over the repository layer.

pub mod alerts;
pub mod thresholds;
pub mod velocity;

pub use alerts::AlertCalculator;
pub use thresholds::{DEFAULT_THRESHOLD, ThresholdPolicy};
pub use velocity::SALES_WINDOW_DAYS;
