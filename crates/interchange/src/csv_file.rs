use crate::error::InterchangeError;
use crate::records::{CustomerRow, OrderLineRow, ProductRow};
use crate::target::{ALL_KINDS, csv_file_in};
use core_types::{CoreError, Customer, EntityKind, Order, OrderId, Product};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::Path;
use store::Snapshot;

pub(crate) fn write_directory(dir: &Path, snapshot: &Snapshot) -> Result<(), InterchangeError> {
    fs::create_dir_all(dir).map_err(InterchangeError::io(dir))?;
    for kind in ALL_KINDS {
        write_collection(&csv_file_in(dir, kind), snapshot, kind)?;
    }
    Ok(())
}

/// Reads whichever of the three collection files exist in `dir`. A missing
/// file counts as an empty collection.
pub(crate) fn read_directory(dir: &Path) -> Result<Snapshot, InterchangeError> {
    if !dir.is_dir() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory");
        return Err(InterchangeError::io(dir)(missing));
    }
    let mut snapshot = Snapshot::default();
    for kind in ALL_KINDS {
        let path = csv_file_in(dir, kind);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No CSV file for {kind}; treating as empty.");
            continue;
        }
        let part = read_collection(&path, kind)?;
        snapshot.customers.extend(part.customers);
        snapshot.products.extend(part.products);
        snapshot.orders.extend(part.orders);
    }
    Ok(snapshot)
}

pub(crate) fn write_collection(
    path: &Path,
    snapshot: &Snapshot,
    kind: EntityKind,
) -> Result<(), InterchangeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(InterchangeError::io(parent))?;
    }
    match kind {
        EntityKind::Customer => write_rows(path, snapshot.customers.iter().map(CustomerRow::from)),
        EntityKind::Product => write_rows(path, snapshot.products.iter().map(ProductRow::from)),
        EntityKind::Order => write_rows(
            path,
            snapshot.orders.iter().flat_map(OrderLineRow::from_order),
        ),
    }
}

pub(crate) fn read_collection(path: &Path, kind: EntityKind) -> Result<Snapshot, InterchangeError> {
    let mut snapshot = Snapshot::default();
    match kind {
        EntityKind::Customer => {
            snapshot.customers = read_entities::<CustomerRow, Customer>(path)?;
        }
        EntityKind::Product => {
            snapshot.products = read_entities::<ProductRow, Product>(path)?;
        }
        EntityKind::Order => snapshot.orders = read_orders(path)?,
    }
    Ok(snapshot)
}

fn write_rows<R, I>(path: &Path, rows: I) -> Result<(), InterchangeError>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut writer = csv::Writer::from_path(path).map_err(InterchangeError::csv(path))?;
    for row in rows {
        writer.serialize(row).map_err(InterchangeError::csv(path))?;
    }
    writer.flush().map_err(InterchangeError::io(path))
}

fn read_rows<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, InterchangeError> {
    let mut reader = csv::Reader::from_path(path).map_err(InterchangeError::csv(path))?;
    reader
        .deserialize()
        .collect::<Result<Vec<R>, csv::Error>>()
        .map_err(InterchangeError::csv(path))
}

fn read_entities<R, T>(path: &Path) -> Result<Vec<T>, InterchangeError>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = CoreError>,
{
    read_rows::<R>(path)?
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            T::try_from(row).map_err(|source| InterchangeError::Record {
                path: path.to_path_buf(),
                row: index + 1,
                source,
            })
        })
        .collect()
}

/// Regroups line rows into orders. Rows of one order need not be adjacent,
/// but they must agree on the customer and date.
fn read_orders(path: &Path) -> Result<Vec<Order>, InterchangeError> {
    let mut orders: BTreeMap<OrderId, Order> = BTreeMap::new();
    for (index, row) in read_rows::<OrderLineRow>(path)?.into_iter().enumerate() {
        match orders.entry(row.order_id) {
            Entry::Vacant(slot) => {
                let mut order = Order::new(row.order_id, row.customer_id, row.date);
                order.add_item(row.item());
                slot.insert(order);
            }
            Entry::Occupied(slot) => {
                let order = slot.into_mut();
                if !row.matches_header(order) {
                    return Err(InterchangeError::Inconsistent {
                        path: path.to_path_buf(),
                        row: index + 1,
                        reason: format!(
                            "order {} appears with a different customer or date",
                            row.order_id
                        ),
                    });
                }
                order.add_item(row.item());
            }
        }
    }
    Ok(orders.into_values().collect())
}
