//! # Orderdesk Analytics
//!
//! This crate turns the order book into sales figures: headline totals,
//! best-seller rankings, time-bucketed trends, and a graph of customers who
//! buy the same things.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It performs no I/O and depends
//!   only on `core-types` (Layer 0). Callers hand it borrowed entities, usually
//!   straight from the record store's iterators.
//! - **Stateless Calculation:** The `AnalyticsEngine` holds no data. Each call is a
//!   deterministic function of its inputs, so the same order book always yields
//!   the same report.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The calculator.
//! - `DateRange`: An optional inclusive filter on order dates.
//! - `SalesSummary`, `ProductStat`, `CustomerStat`, `TrendPoint`: Report rows.
//! - `CustomerConnections`: The co-purchase graph, backed by `petgraph`.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

pub mod engine;
pub mod error;
pub mod filter;
pub mod graph;
pub mod report;
mod trend;

pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use filter::DateRange;
pub use graph::{Connection, CustomerConnections, CustomerNode};
pub use report::{CustomerStat, ProductStat, SalesSummary, TrendPoint};
