use crate::error::InterchangeError;
use crate::records::OrderRecord;
use core_types::{Customer, EntityKind, Order, Product};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use store::Snapshot;

/// The full-export document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    customers: Vec<Customer>,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    orders: Vec<OrderRecord>,
}

pub(crate) fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), InterchangeError> {
    let document = SnapshotDocument {
        customers: snapshot.customers.clone(),
        products: snapshot.products.clone(),
        orders: snapshot.orders.iter().map(OrderRecord::from).collect(),
    };
    write_json(path, &document)
}

pub(crate) fn read_snapshot(path: &Path) -> Result<Snapshot, InterchangeError> {
    let document: SnapshotDocument = read_json(path)?;
    Ok(Snapshot {
        customers: document.customers,
        products: document.products,
        orders: document.orders.into_iter().map(Order::from).collect(),
    })
}

pub(crate) fn write_collection(
    path: &Path,
    snapshot: &Snapshot,
    kind: EntityKind,
) -> Result<(), InterchangeError> {
    match kind {
        EntityKind::Customer => write_json(path, &snapshot.customers),
        EntityKind::Product => write_json(path, &snapshot.products),
        EntityKind::Order => {
            let records: Vec<OrderRecord> = snapshot.orders.iter().map(OrderRecord::from).collect();
            write_json(path, &records)
        }
    }
}

/// Reads a bare array of one collection into an otherwise empty snapshot.
pub(crate) fn read_collection(path: &Path, kind: EntityKind) -> Result<Snapshot, InterchangeError> {
    let mut snapshot = Snapshot::default();
    match kind {
        EntityKind::Customer => snapshot.customers = read_json(path)?,
        EntityKind::Product => snapshot.products = read_json(path)?,
        EntityKind::Order => {
            let records: Vec<OrderRecord> = read_json(path)?;
            snapshot.orders = records.into_iter().map(Order::from).collect();
        }
    }
    Ok(snapshot)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), InterchangeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(InterchangeError::io(parent))?;
    }
    let file = File::create(path).map_err(InterchangeError::io(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(InterchangeError::json(path))?;
    writer.flush().map_err(InterchangeError::io(path))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InterchangeError> {
    let content = fs::read_to_string(path).map_err(InterchangeError::io(path))?;
    serde_json::from_str(&content).map_err(InterchangeError::json(path))
}
