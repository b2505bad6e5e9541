//! # Orderdesk Core Types
//!
//! The entities every other crate in the workspace speaks: customers,
//! products, orders and their line items, plus the typed identifiers and
//! validated contact fields they are built from.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** No I/O and no knowledge of storage or presentation.
//! - **Validated at the edges:** constructors and `validate` methods reject
//!   malformed input with a [`CoreError`]; `Email` and `Phone` also validate
//!   when deserialized.
//! - **Derived totals:** an [`Order`] never stores its total. It is always
//!   recomputed from the line items' price snapshots.

pub mod contact;
pub mod enums;
pub mod error;
pub mod ids;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use contact::{Email, Phone};
pub use enums::{EntityKind, RankBy, TrendPeriod};
pub use error::CoreError;
pub use ids::{CustomerId, OrderId, ProductId};
pub use structs::{Customer, Order, OrderItem, Product};
