//! Low-stock threshold resolution by product type.

use std::collections::HashMap;

/// Built-in floors by product type. Consumables turn over fast and need a
/// deeper buffer; bundles are assembled on demand and tolerate a shallow one.
const BUILTIN_THRESHOLDS: [(&str, i32); 3] =
    [("consumable", 20), ("electronic", 10), ("bundle", 5)];

/// Floor applied to product types absent from the table.
pub const DEFAULT_THRESHOLD: i32 = 10;

/// Total mapping from product type to low-stock floor.
///
/// Resolution never fails: unrecognized product types fall back to the
/// default, so a typo in a product row degrades to the default floor rather
/// than an error.
#[derive(Debug, Clone)]
pub struct ThresholdPolicy {
    thresholds: HashMap<String, i32>,
    default: i32,
}

impl ThresholdPolicy {
    /// Build a policy from a default floor and per-type overrides.
    ///
    /// Overrides are merged over the built-in table, so an operator can
    /// retune one product type without restating the others.
    #[must_use]
    pub fn new(default: i32, overrides: impl IntoIterator<Item = (String, i32)>) -> Self {
        let mut thresholds: HashMap<String, i32> = BUILTIN_THRESHOLDS
            .iter()
            .map(|&(product_type, floor)| (product_type.to_string(), floor))
            .collect();
        thresholds.extend(overrides);

        Self {
            thresholds,
            default,
        }
    }

    /// Resolve the low-stock floor for a product type.
    #[must_use]
    pub fn resolve(&self, product_type: &str) -> i32 {
        self.thresholds
            .get(product_type)
            .copied()
            .unwrap_or(self.default)
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, [])
    }
}
