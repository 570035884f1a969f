//! Stockwatch API library.
//!
//! This crate provides the low-stock alert service as a library, allowing
//! the route handlers and computation pipeline to be tested in-process and
//! reused by the CLI and integration tests.
//!
//! # Architecture
//!
//! - `routes` - axum handlers (the HTTP surface)
//! - `services` - gating, thresholds, velocity (the computation)
//! - `db` - repositories issuing the three set-based queries
//! - `models` - database-facing records and wire types
//!
//! Every request recomputes its answer from the database. There is no
//! cache, no stored alert history, and no background scheduling.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
