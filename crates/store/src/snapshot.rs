use core_types::{Customer, Order, Product};
use serde::{Deserialize, Serialize};

/// The three collections as plain vectors.
///
/// This is the unit of exchange between the record store and everything that
/// reads or writes files. A missing collection deserializes as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.products.is_empty() && self.orders.is_empty()
    }

    /// Total number of records across all collections.
    pub fn len(&self) -> usize {
        self.customers.len() + self.products.len() + self.orders.len()
    }
}
