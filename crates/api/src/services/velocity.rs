//! Sales velocity and stockout projection.
//!
//! Velocity is a plain average over the trailing window: total units moved
//! out divided by the window length in days. No weighting, no seasonality.

/// Length of the trailing sales window, in days.
pub const SALES_WINDOW_DAYS: u32 = 30;

/// Average units sold per day over a window of `window_days`.
///
/// `units_sold` is the absolute value of the summed negative movement
/// quantities. `window_days` must be nonzero; configuration loading rejects
/// zero before it can reach here.
#[must_use]
pub fn average_daily_sales(units_sold: i64, window_days: u32) -> f64 {
    #[allow(clippy::cast_precision_loss)] // window sums stay far below 2^52
    let total = units_sold as f64;
    total / f64::from(window_days)
}

/// Whole days of supply remaining at the given daily rate, rounded down.
///
/// `daily_rate` must be positive; callers exclude zero-velocity records
/// before projecting.
#[must_use]
pub fn days_until_stockout(quantity: i32, daily_rate: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)] // floor of a small non-negative ratio
    let days = (f64::from(quantity) / daily_rate).floor() as i64;
    days
}
