use crate::error::StoreError;
use crate::repository::RecordStore;
use crate::snapshot::Snapshot;
use core_types::EntityKind;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// A directory holding one JSON file per collection
/// (`customers.json`, `products.json`, `orders.json`).
///
/// This is the application's working copy of its data. The record store is
/// loaded from it at startup and written back after every mutating command.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Opens the data directory, creating it and any missing collection file.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = Self { root: root.into() };
        fs::create_dir_all(&data_dir.root)?;

        for kind in [EntityKind::Customer, EntityKind::Product, EntityKind::Order] {
            let path = data_dir.file_for(kind);
            if !path.exists() {
                fs::write(&path, "[]\n")?;
                tracing::debug!(path = %path.display(), "Initialised empty collection file.");
            }
        }
        Ok(data_dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_for(&self, kind: EntityKind) -> PathBuf {
        self.root.join(format!("{}.json", kind.file_stem()))
    }

    /// Reads all three collections and rebuilds a validated `RecordStore`.
    pub fn load(&self) -> Result<RecordStore, StoreError> {
        let snapshot = Snapshot {
            customers: self.read_collection(EntityKind::Customer)?,
            products: self.read_collection(EntityKind::Product)?,
            orders: self.read_collection(EntityKind::Order)?,
        };
        let store = RecordStore::try_from(snapshot)?;
        tracing::debug!(
            root = %self.root.display(),
            customers = store.customer_count(),
            products = store.product_count(),
            orders = store.order_count(),
            "Loaded data directory."
        );
        Ok(store)
    }

    /// Writes all three collections. Each file is replaced atomically.
    pub fn save(&self, store: &RecordStore) -> Result<(), StoreError> {
        let snapshot = store.snapshot();
        self.write_collection(EntityKind::Customer, &snapshot.customers)?;
        self.write_collection(EntityKind::Product, &snapshot.products)?;
        self.write_collection(EntityKind::Order, &snapshot.orders)?;
        tracing::debug!(root = %self.root.display(), "Saved data directory.");
        Ok(())
    }

    fn read_collection<T: DeserializeOwned>(&self, kind: EntityKind) -> Result<Vec<T>, StoreError> {
        let path = self.file_for(kind);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            file: path.display().to_string(),
            source,
        })
    }

    fn write_collection<T: Serialize>(
        &self,
        kind: EntityKind,
        items: &[T],
    ) -> Result<(), StoreError> {
        let path = self.file_for(kind);
        let mut json = serde_json::to_string_pretty(items).map_err(|source| StoreError::Json {
            file: path.display().to_string(),
            source,
        })?;
        json.push('\n');

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
