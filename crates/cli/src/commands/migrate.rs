//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! sw-cli migrate run
//!
//! # Show applied and pending migrations
//! sw-cli migrate info
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKWATCH_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)
//!
//! Migration files live in `crates/api/migrations/` and are embedded into
//! the binary at compile time.

use std::collections::HashSet;

use secrecy::SecretString;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use stockwatch_api::db;

static MIGRATOR: Migrator = sqlx::migrate!("../api/migrations");

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is missing, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    info!("Running migrations...");
    MIGRATOR.run(&pool).await?;
    info!("Migrations complete!");

    Ok(())
}

/// Show each embedded migration and whether it has been applied.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is missing or the
/// connection fails.
pub async fn info() -> Result<(), MigrationError> {
    let pool = connect().await?;

    // A fresh database has no _sqlx_migrations table yet; treat that the
    // same as nothing applied.
    let applied: HashSet<i64> = sqlx::query_scalar::<_, i64>(
        "SELECT version FROM _sqlx_migrations ORDER BY version",
    )
    .fetch_all(&pool)
    .await
    .map(|versions| versions.into_iter().collect())
    .unwrap_or_default();

    for migration in MIGRATOR.iter() {
        let status = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };
        info!("[{status}] {} {}", migration.version, migration.description);
    }

    Ok(())
}

async fn connect() -> Result<PgPool, MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOCKWATCH_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("STOCKWATCH_DATABASE_URL"))?;

    info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}
