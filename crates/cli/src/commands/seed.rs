//! Seed the database from a YAML fixture.
//!
//! The fixture declares suppliers, a product catalog, and companies with
//! their warehouses, stock levels, and recent movement history. Movement
//! timestamps are given as `days_ago` offsets so a fixture keeps producing
//! "recent" sales however long it sits in the repo.
//!
//! # Usage
//!
//! ```bash
//! sw-cli seed --file crates/cli/fixtures/demo.yaml --reset
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKWATCH_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{Duration, Utc};
use secrecy::SecretString;
use serde::Deserialize;
use sqlx::{PgConnection, PgPool};
use tracing::{error, info};

use stockwatch_api::db;
use stockwatch_core::{Email, Sku};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read {0}: {1}")]
    Io(String, #[source] std::io::Error),

    #[error("Invalid fixture: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{0} validation errors found")]
    Validation(usize),

    #[error("Fixture references unknown {0}")]
    UnknownReference(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// ===== Fixture format =====

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub suppliers: Vec<SupplierSeed>,
    #[serde(default)]
    pub products: Vec<ProductSeed>,
    #[serde(default)]
    pub companies: Vec<CompanySeed>,
}

#[derive(Debug, Deserialize)]
pub struct SupplierSeed {
    pub name: String,
    pub contact_email: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductSeed {
    pub name: String,
    pub sku: String,
    pub product_type: String,
    /// Supplier names, linked in the order given.
    #[serde(default)]
    pub suppliers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompanySeed {
    pub name: String,
    #[serde(default)]
    pub warehouses: Vec<WarehouseSeed>,
}

#[derive(Debug, Deserialize)]
pub struct WarehouseSeed {
    pub name: String,
    #[serde(default)]
    pub inventory: Vec<InventorySeed>,
}

#[derive(Debug, Deserialize)]
pub struct InventorySeed {
    /// SKU of a product declared in the catalog section.
    pub sku: String,
    pub quantity: i32,
    #[serde(default)]
    pub movements: Vec<MovementSeed>,
}

#[derive(Debug, Deserialize)]
pub struct MovementSeed {
    /// Signed quantity delta; negative is outbound.
    pub change: i32,
    /// How many days before "now" the movement happened.
    pub days_ago: i64,
}

// ===== Command =====

/// Load a fixture file into the database.
///
/// The whole load runs in one transaction: a fixture either lands
/// completely or not at all.
///
/// # Errors
///
/// Returns `SeedError` if environment variables are missing, the file
/// cannot be read or parsed, validation fails, or an insert fails.
pub async fn from_file(file_path: &str, reset: bool) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOCKWATCH_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("STOCKWATCH_DATABASE_URL"))?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_string()));
    }

    info!(path = %file_path, "Loading fixture");

    // Read and validate before touching the database.
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SeedError::Io(file_path.to_string(), e))?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;

    let errors = validate(&seed);
    if !errors.is_empty() {
        error!("Fixture validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(SeedError::Validation(errors.len()));
    }

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    if reset {
        reset_tables(&pool).await?;
        info!("Existing data cleared");
    }

    let mut tx = pool.begin().await?;
    let counts = insert_all(&mut tx, &seed).await?;
    tx.commit().await?;

    info!("Seeding complete!");
    info!("  Suppliers: {}", counts.suppliers);
    info!("  Products: {}", counts.products);
    info!("  Companies: {}", counts.companies);
    info!("  Warehouses: {}", counts.warehouses);
    info!("  Inventory records: {}", counts.inventory);
    info!("  Movements: {}", counts.movements);

    Ok(())
}

// ===== Validation =====

/// Check the fixture for problems the database would only surface one at a
/// time (or worse, not at all).
fn validate(seed: &SeedFile) -> Vec<String> {
    let mut errors = Vec::new();

    let mut supplier_names = HashSet::new();
    for supplier in &seed.suppliers {
        if !supplier_names.insert(supplier.name.as_str()) {
            errors.push(format!("duplicate supplier name {:?}", supplier.name));
        }
        if let Err(e) = Email::parse(&supplier.contact_email) {
            errors.push(format!(
                "supplier {:?} has invalid contact_email: {e}",
                supplier.name
            ));
        }
    }

    let mut skus = HashSet::new();
    for product in &seed.products {
        if let Err(e) = Sku::parse(&product.sku) {
            errors.push(format!("product {:?} has invalid sku: {e}", product.name));
        }
        if !skus.insert(product.sku.as_str()) {
            errors.push(format!("duplicate sku {:?}", product.sku));
        }
        for supplier in &product.suppliers {
            if !supplier_names.contains(supplier.as_str()) {
                errors.push(format!(
                    "product {:?} references unknown supplier {supplier:?}",
                    product.name
                ));
            }
        }
    }

    for company in &seed.companies {
        for warehouse in &company.warehouses {
            let mut stocked = HashSet::new();
            for item in &warehouse.inventory {
                if !skus.contains(item.sku.as_str()) {
                    errors.push(format!(
                        "warehouse {:?} stocks unknown sku {:?}",
                        warehouse.name, item.sku
                    ));
                }
                if !stocked.insert(item.sku.as_str()) {
                    errors.push(format!(
                        "warehouse {:?} lists sku {:?} twice",
                        warehouse.name, item.sku
                    ));
                }
                if item.quantity < 0 {
                    errors.push(format!(
                        "sku {:?} in warehouse {:?} has negative quantity",
                        item.sku, warehouse.name
                    ));
                }
                for movement in &item.movements {
                    if movement.change == 0 {
                        errors.push(format!(
                            "sku {:?} in warehouse {:?} has a zero-quantity movement",
                            item.sku, warehouse.name
                        ));
                    }
                    if movement.days_ago < 0 {
                        errors.push(format!(
                            "sku {:?} in warehouse {:?} has a movement in the future",
                            item.sku, warehouse.name
                        ));
                    }
                }
            }
        }
    }

    errors
}

// ===== Inserts =====

#[derive(Debug, Default)]
struct SeedCounts {
    suppliers: usize,
    products: usize,
    companies: usize,
    warehouses: usize,
    inventory: usize,
    movements: usize,
}

async fn reset_tables(pool: &PgPool) -> Result<(), SeedError> {
    sqlx::query(
        "TRUNCATE companies, warehouses, products, suppliers,
                  product_suppliers, inventory, inventory_movements
         RESTART IDENTITY CASCADE",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn insert_all(tx: &mut PgConnection, seed: &SeedFile) -> Result<SeedCounts, SeedError> {
    let mut counts = SeedCounts::default();

    let mut supplier_ids: HashMap<&str, i32> = HashMap::new();
    for supplier in &seed.suppliers {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO suppliers (name, contact_email) VALUES ($1, $2) RETURNING id",
        )
        .bind(&supplier.name)
        .bind(&supplier.contact_email)
        .fetch_one(&mut *tx)
        .await?;
        supplier_ids.insert(supplier.name.as_str(), id);
        counts.suppliers += 1;
    }

    let mut product_ids: HashMap<&str, i32> = HashMap::new();
    for product in &seed.products {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO products (name, sku, product_type) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.product_type)
        .fetch_one(&mut *tx)
        .await?;
        product_ids.insert(product.sku.as_str(), id);
        counts.products += 1;

        for supplier in &product.suppliers {
            let supplier_id = supplier_ids
                .get(supplier.as_str())
                .copied()
                .ok_or_else(|| SeedError::UnknownReference(format!("supplier {supplier:?}")))?;
            sqlx::query(
                "INSERT INTO product_suppliers (product_id, supplier_id) VALUES ($1, $2)",
            )
            .bind(id)
            .bind(supplier_id)
            .execute(&mut *tx)
            .await?;
        }
    }

    for company in &seed.companies {
        let company_id: i32 =
            sqlx::query_scalar("INSERT INTO companies (name) VALUES ($1) RETURNING id")
                .bind(&company.name)
                .fetch_one(&mut *tx)
                .await?;
        counts.companies += 1;

        for warehouse in &company.warehouses {
            let warehouse_id: i32 = sqlx::query_scalar(
                "INSERT INTO warehouses (company_id, name) VALUES ($1, $2) RETURNING id",
            )
            .bind(company_id)
            .bind(&warehouse.name)
            .fetch_one(&mut *tx)
            .await?;
            counts.warehouses += 1;

            for item in &warehouse.inventory {
                let product_id = product_ids
                    .get(item.sku.as_str())
                    .copied()
                    .ok_or_else(|| SeedError::UnknownReference(format!("sku {:?}", item.sku)))?;
                let inventory_id: i32 = sqlx::query_scalar(
                    "INSERT INTO inventory (product_id, warehouse_id, quantity)
                     VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(product_id)
                .bind(warehouse_id)
                .bind(item.quantity)
                .fetch_one(&mut *tx)
                .await?;
                counts.inventory += 1;

                for movement in &item.movements {
                    let created_at = Utc::now() - Duration::days(movement.days_ago);
                    sqlx::query(
                        "INSERT INTO inventory_movements (inventory_id, change_quantity, created_at)
                         VALUES ($1, $2, $3)",
                    )
                    .bind(inventory_id)
                    .bind(movement.change)
                    .bind(created_at)
                    .execute(&mut *tx)
                    .await?;
                    counts.movements += 1;
                }
            }
        }
    }

    Ok(counts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DEMO_FIXTURE: &str = include_str!("../../fixtures/demo.yaml");

    fn minimal_fixture() -> SeedFile {
        serde_yaml::from_str(
            r"
            suppliers:
              - name: Keytron Components
                contact_email: orders@keytron.example
            products:
              - name: Mechanical Keyboard
                sku: KB-MECH-87
                product_type: electronic
                suppliers: [Keytron Components]
            companies:
              - name: Apex Outfitters
                warehouses:
                  - name: Portland DC
                    inventory:
                      - sku: KB-MECH-87
                        quantity: 8
                        movements:
                          - change: -5
                            days_ago: 3
            ",
        )
        .unwrap()
    }

    #[test]
    fn valid_fixture_passes_validation() {
        assert!(validate(&minimal_fixture()).is_empty());
    }

    #[test]
    fn unknown_sku_is_reported() {
        let mut seed = minimal_fixture();
        seed.companies[0].warehouses[0].inventory[0].sku = "NO-SUCH-SKU".to_string();
        let errors = validate(&seed);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unknown sku"));
    }

    #[test]
    fn unknown_supplier_is_reported() {
        let mut seed = minimal_fixture();
        seed.products[0].suppliers = vec!["Ghost Supply Co".to_string()];
        let errors = validate(&seed);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unknown supplier"));
    }

    #[test]
    fn bad_email_and_negative_quantity_are_reported() {
        let mut seed = minimal_fixture();
        seed.suppliers[0].contact_email = "not-an-email".to_string();
        seed.companies[0].warehouses[0].inventory[0].quantity = -1;
        let errors = validate(&seed);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn zero_and_future_movements_are_reported() {
        let mut seed = minimal_fixture();
        seed.companies[0].warehouses[0].inventory[0].movements = vec![
            MovementSeed {
                change: 0,
                days_ago: 1,
            },
            MovementSeed {
                change: -2,
                days_ago: -1,
            },
        ];
        let errors = validate(&seed);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn duplicate_sku_is_reported() {
        let mut seed = minimal_fixture();
        seed.products.push(ProductSeed {
            name: "Second Keyboard".to_string(),
            sku: "KB-MECH-87".to_string(),
            product_type: "electronic".to_string(),
            suppliers: Vec::new(),
        });
        let errors = validate(&seed);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("duplicate sku"));
    }

    #[test]
    fn demo_fixture_parses_and_validates() {
        let seed: SeedFile = serde_yaml::from_str(DEMO_FIXTURE).unwrap();
        assert!(validate(&seed).is_empty());

        // The demo covers both alerting and non-alerting cases.
        assert!(seed.companies.len() >= 2);
        assert!(seed.products.len() >= 4);
        assert!(
            seed.products
                .iter()
                .any(|product| product.suppliers.is_empty()),
            "demo should include a product without a supplier"
        );
    }
}
