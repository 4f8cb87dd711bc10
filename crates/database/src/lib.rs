//! # Stockscope Database Crate
//!
//! This crate is the application-specific interface to the PostgreSQL database
//! holding instruments (`stocks`) and their daily bars (`stock_histories`).
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the application sees typed
//!   records from `core-types` and the `PriceStore` trait from `analytics`.
//! - **Asynchronous & Pooled:** All operations are asynchronous and share a
//!   connection pool (`PgPool`).
//!
//! ## Public API
//!
//! - `connect` / `connect_lazy`: build the connection pool.
//! - `run_migrations`: apply the embedded schema migrations.
//! - `DbRepository`: record management plus the `PriceStore` implementation.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_lazy, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
