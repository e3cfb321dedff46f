//! # Sales Analytics Engine
//!
//! This crate turns raw sales records into a ranked seller performance report:
//! revenue, profit, number of sales, best-selling products and a rank-based bonus
//! for every seller.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O besides logging. It depends only on `core-types` for
//!   its inputs and on `configuration` for bonus tiers and report settings.
//! - **Stateless Calculation:** The `SalesAggregator` takes the input document and
//!   a set of scoring functions and produces the report. All working state lives
//!   for the duration of a single `run`.
//! - **Pluggable Policies:** Revenue, profit and bonus are injected through
//!   `ScoringOptions`, so alternative pricing or bonus rules need no changes here.
//!
//! ## Public API
//!
//! - `SalesAggregator`: The struct that contains the aggregation logic.
//! - `ScoringOptions`: The revenue, profit and bonus function slots.
//! - `ReportRow`: One seller's line in the final report.
//! - `parse_sales_data`: Parses the JSON input document.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod load;
pub mod report;
pub mod scoring;
pub mod stat;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{SalesAggregator, DEFAULT_TOP_PRODUCTS_LIMIT};
pub use error::AnalyticsError;
pub use load::parse_sales_data;
pub use report::{ReportRow, TopProduct};
pub use scoring::{
    bonus_by_profit, simple_profit, simple_revenue, tiered_bonus, BonusFn, ProfitFn, RevenueFn,
    ScoringOptions,
};
pub use stat::SellerStat;
