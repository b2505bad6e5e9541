//! # Orderdesk Record Store
//!
//! This crate owns the customer, product and order collections. It is the only
//! place records are created, changed or removed.
//!
//! ## Architectural Principles
//!
//! - **Single owner:** `RecordStore` holds every collection in a `BTreeMap`
//!   keyed by identifier. Callers get shared references or clones, never
//!   mutable access to a record.
//! - **Integrity on every write:** records are validated on insert and update,
//!   orders must reference an existing customer and existing products, and a
//!   customer or product cannot be removed while an order references it.
//! - **Stock follows orders:** placing an order draws stock, removing it
//!   returns the stock.
//! - **Explicit persistence:** `DataDir` loads and saves the collections as
//!   JSON files. The store itself does no I/O.
//!
//! ## Public API
//!
//! - `RecordStore`: CRUD, search, snapshot/restore/merge.
//! - `Snapshot`: the three collections as plain vectors.
//! - `DataDir`: the on-disk working copy.
//! - `StoreError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod persistence;
pub mod repository;
pub mod snapshot;

// Re-export the key components to create a clean, public-facing API.
pub use error::StoreError;
pub use persistence::DataDir;
pub use repository::RecordStore;
pub use snapshot::Snapshot;
