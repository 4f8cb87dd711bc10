//! # Stockscope Analytics Engine
//!
//! This crate answers analytical questions about daily price bars over arbitrary
//! date windows. It is the only part of the system with real logic; everything
//! around it is record keeping.
//!
//! ## Architectural Principles
//!
//! - **Store Abstraction:** All data access goes through the `PriceStore` trait.
//!   The engine never writes, so any store with a sane read consistency model is
//!   sufficient. `MemoryStore` is an in-process implementation; the `database`
//!   crate provides the PostgreSQL one.
//! - **Stateless Calculation:** Extremes and profits are recomputed per request.
//!   The pure functions (`find_extremes`, `ProfitMap::from_bars`) are separated
//!   from the async wrappers that feed them from a store.
//! - **Deterministic Tie-Breaks:** Best buy orders by `low` then `date`, best sell
//!   by `high` descending then `date`, so results never depend on row order.
//!
//! ## Public API
//!
//! - `PeriodComparator`: compares a window with its previous and next windows.
//! - `find_extremes` / `find_window_extremes`: the single best trade in a window.
//! - `ProfitMap`, `max_profit_for`, `max_profit_all`: the unlimited-trade optimum.
//! - `Report`: the serializable result of a comparison.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod comparator;
pub mod error;
pub mod extremes;
pub mod profit;
pub mod report;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use comparator::PeriodComparator;
pub use error::AnalyticsError;
pub use extremes::{find_extremes, find_window_extremes, ExtremesResult, PricePoint};
pub use profit::{max_profit_all, max_profit_for, ProfitEntry, ProfitMap};
pub use report::{Analysis, PeriodAnalysis, Report, ReportMetadata};
pub use store::{MemoryStore, PriceStore};
