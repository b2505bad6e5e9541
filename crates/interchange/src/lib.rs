//! # Orderdesk Interchange
//!
//! This crate moves the record collections in and out of files that other
//! tools can read: JSON documents and CSV sheets.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** It speaks `Snapshot`, the store's unit of exchange,
//!   and never touches a collection directly. Imports are applied through
//!   `RecordStore::restore` or `RecordStore::merge`, so every imported record
//!   goes through the same validation as one typed in by a user.
//! - **Format from the path:** `.json` and `.csv` pick the format, a path without
//!   an extension is a directory of CSV files. See [`Target`].
//! - **Lossless round trips:** order totals are derived, never trusted from a
//!   file, and CSV orders are written one row per line item.
//!
//! ## Public API
//!
//! - `export`: Writes a snapshot to a target.
//! - `import`: Reads a target back into a snapshot.
//! - `import_into`: Reads a target and applies it to a `RecordStore`.
//! - `Target`: The resolved destination or source.
//! - `InterchangeError`: The specific error types that can be returned from this crate.

mod csv_file;
pub mod error;
mod json_file;
pub mod records;
pub mod target;

pub use error::InterchangeError;
pub use records::{CustomerRow, OrderLineRow, OrderRecord, ProductRow};
pub use target::Target;

use core_types::EntityKind;
use std::path::Path;
use store::{RecordStore, Snapshot};

/// How an import was applied to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// The store's contents were replaced.
    Replaced,
    /// The records were added to the existing ones.
    Merged,
}

/// What `import_into` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub mode: ImportMode,
    pub records: usize,
}

/// Writes `snapshot` to `path`. With `only`, just that collection is written.
pub fn export(
    snapshot: &Snapshot,
    path: &Path,
    only: Option<EntityKind>,
) -> Result<Target, InterchangeError> {
    let target = Target::resolve(path, only)?;
    match &target {
        Target::JsonSnapshot(path) => json_file::write_snapshot(path, snapshot)?,
        Target::JsonCollection(path, kind) => json_file::write_collection(path, snapshot, *kind)?,
        Target::CsvCollection(path, kind) => csv_file::write_collection(path, snapshot, *kind)?,
        Target::CsvDirectory(dir) => csv_file::write_directory(dir, snapshot)?,
    }
    tracing::info!(path = %target.path().display(), records = snapshot.len(), "Export complete.");
    Ok(target)
}

/// Reads the collections stored at `path`. With `only`, the file is read as
/// that single collection.
pub fn import(
    path: &Path,
    only: Option<EntityKind>,
) -> Result<(Target, Snapshot), InterchangeError> {
    let target = Target::resolve(path, only)?;
    let snapshot = match &target {
        Target::JsonSnapshot(path) => json_file::read_snapshot(path)?,
        Target::JsonCollection(path, kind) => json_file::read_collection(path, *kind)?,
        Target::CsvCollection(path, kind) => csv_file::read_collection(path, *kind)?,
        Target::CsvDirectory(dir) => csv_file::read_directory(dir)?,
    };
    Ok((target, snapshot))
}

/// Imports `path` into `store`.
///
/// A target holding every collection replaces the store. A single collection
/// is merged into it. Either way the store is left untouched on error.
pub fn import_into(
    store: &mut RecordStore,
    path: &Path,
    only: Option<EntityKind>,
) -> Result<ImportOutcome, InterchangeError> {
    let (target, snapshot) = import(path, only)?;
    if snapshot.is_empty() {
        tracing::warn!(path = %target.path().display(), "Import source holds no records.");
    }
    let records = snapshot.len();
    let mode = if target.is_complete() {
        store.restore(snapshot)?;
        ImportMode::Replaced
    } else {
        store.merge(snapshot)?;
        ImportMode::Merged
    };
    tracing::info!(path = %target.path().display(), records, ?mode, "Import complete.");
    Ok(ImportOutcome { mode, records })
}
