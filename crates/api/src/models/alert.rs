//! Wire types for the low-stock alert endpoint.
//!
//! Field names here are the response contract; renaming one is a breaking
//! API change.

use serde::{Deserialize, Serialize};
use stockwatch_core::{Email, ProductId, Sku, SupplierId, WarehouseId};

/// A supplier linked to an alerting product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRef {
    pub id: SupplierId,
    pub name: String,
    pub contact_email: Email,
}

/// One product at one warehouse projected to run out of stock.
///
/// A product stocked in several warehouses produces one entry per
/// qualifying warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEntry {
    pub product_id: ProductId,
    pub product_name: String,
    pub sku: Sku,
    pub warehouse_id: WarehouseId,
    pub warehouse_name: String,
    pub current_stock: i32,
    pub threshold: i32,
    pub days_until_stockout: i64,
    /// Serialized as `null` when the product has no linked supplier, so the
    /// key is always present.
    pub supplier: Option<SupplierRef>,
}

/// Response body for the low-stock alert endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertResponse {
    pub alerts: Vec<AlertEntry>,
    pub total_alerts: usize,
}

impl AlertResponse {
    /// The empty result for a company with nothing to report.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            alerts: Vec::new(),
            total_alerts: 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_entry(supplier: Option<SupplierRef>) -> AlertEntry {
        AlertEntry {
            product_id: ProductId::new(7),
            product_name: "Mechanical Keyboard".to_string(),
            sku: Sku::parse("KB-MECH-87").unwrap(),
            warehouse_id: WarehouseId::new(3),
            warehouse_name: "Portland DC".to_string(),
            current_stock: 8,
            threshold: 10,
            days_until_stockout: 4,
            supplier,
        }
    }

    #[test]
    fn supplier_key_is_null_when_absent() {
        let json = serde_json::to_value(sample_entry(None)).unwrap();
        assert!(json.get("supplier").is_some());
        assert_eq!(json["supplier"], serde_json::Value::Null);
    }

    #[test]
    fn supplier_serializes_as_object_when_present() {
        let entry = sample_entry(Some(SupplierRef {
            id: SupplierId::new(12),
            name: "Keytron Components".to_string(),
            contact_email: Email::parse("orders@keytron.example").unwrap(),
        }));

        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["supplier"]["id"], 12);
        assert_eq!(json["supplier"]["name"], "Keytron Components");
        assert_eq!(json["supplier"]["contact_email"], "orders@keytron.example");
    }

    #[test]
    fn empty_response_shape() {
        let json = serde_json::to_value(AlertResponse::empty()).unwrap();
        assert_eq!(json, serde_json::json!({ "alerts": [], "total_alerts": 0 }));
    }

    #[test]
    fn entry_field_names_are_stable() {
        let json = serde_json::to_value(sample_entry(None)).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "product_id",
            "product_name",
            "sku",
            "warehouse_id",
            "warehouse_name",
            "current_stock",
            "threshold",
            "days_until_stockout",
            "supplier",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(object.len(), 9);
    }

    #[test]
    fn response_round_trips_with_typed_ids() {
        let response = AlertResponse {
            alerts: vec![sample_entry(None)],
            total_alerts: 1,
        };

        let text = serde_json::to_string(&response).unwrap();
        let parsed: AlertResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.total_alerts, 1);
        assert_eq!(parsed.alerts[0].product_id, ProductId::new(7));
        assert_eq!(parsed.alerts[0].sku.as_str(), "KB-MECH-87");
    }
}
