//! Integration tests for Stockwatch.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and prepare the schema
//! cargo run -p stockwatch-cli -- migrate run
//!
//! # Optional: load the demo fixture
//! cargo run -p stockwatch-cli -- seed --file crates/cli/fixtures/demo.yaml --reset
//!
//! # Start the API
//! cargo run -p stockwatch-api
//!
//! # Run the ignored end-to-end tests
//! cargo test -p stockwatch-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKWATCH_BASE_URL` - API base URL (default: `http://localhost:8080`)
//! - `STOCKWATCH_DATABASE_URL` - `PostgreSQL` connection string used by the
//!   tests to arrange and clean up data (falls back to `DATABASE_URL`)
//!
//! Each test arranges its own uniquely-named companies and products over
//! SQL and deletes them afterwards, so the suite can run against a database
//! that also holds the demo fixture.
