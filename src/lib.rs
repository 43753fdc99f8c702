//! Enrichment Analytics API Library
//!
//! HTTP service with a simulated source listing of enrichment jobs and two
//! read endpoints over the warehouse's gold-layer reporting table, all behind a
//! static bearer token.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core domain logic.
//! - `data`: Data access layer.
//! - `obs`: Observability and logging.
//! - `auth`: Bearer-token gate.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `docs`: OpenAPI document and Swagger UI.
//! - `errors`: Error handling types.
//! - `gold_filter`: Typed filter predicates for the gold listing.
//! - `gold_repository`: Gold-layer queries.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.
//! - `server`: Router and middleware stack.
//! - `simulator`: Synthetic source listing.

pub mod api;
pub mod core;
pub mod data;
pub mod obs;

// Re-export primary modules for shared use in tests and other binaries
pub mod auth;
pub mod config;
pub mod db;
pub mod docs;
pub mod errors;
pub mod gold_filter;
pub mod gold_repository;
pub mod handlers;
pub mod models;
pub mod server;
pub mod simulator;
