//! File-level shapes of the records.
//!
//! JSON keeps customers and products as they are and adds an informational
//! `total_amount` to each order. CSV cells are flat, so every entity has a
//! row struct, and orders become one row per line item.

use chrono::{DateTime, Utc};
use core_types::{
    CoreError, Customer, CustomerId, Order, OrderId, OrderItem, Product, ProductId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An order as written to JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    /// Written for readers of the file. Ignored on import apart from a
    /// warning when it disagrees with the line items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id,
            customer_id: order.customer_id,
            date: order.date,
            items: order.items.clone(),
            total_amount: Some(order.total_amount()),
        }
    }
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        let order = Order {
            order_id: record.order_id,
            customer_id: record.customer_id,
            date: record.date,
            items: record.items,
        };
        if let Some(stated) = record.total_amount {
            let computed = order.total_amount();
            if stated != computed {
                tracing::warn!(
                    order_id = %order.order_id,
                    %stated,
                    %computed,
                    "Imported order total disagrees with its line items; using the computed total."
                );
            }
        }
        order
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRow {
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            customer_id: customer.customer_id,
            name: customer.name.clone(),
            email: customer.email.to_string(),
            phone: customer.phone.to_string(),
            address: customer.address.clone(),
        }
    }
}

impl TryFrom<CustomerRow> for Customer {
    type Error = CoreError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        Customer::new(row.customer_id, &row.name, &row.email, &row.phone, &row.address)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub product_id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub stock: u32,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            stock: product.stock,
        }
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = CoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Product::new(row.product_id, &row.name, row.price, &row.category, row.stock)
    }
}

/// One line item of an order, with the order's header repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRow {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub date: DateTime<Utc>,
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

impl OrderLineRow {
    /// Flattens an order into its rows, in line item order.
    pub fn from_order(order: &Order) -> impl Iterator<Item = OrderLineRow> + '_ {
        order.items.iter().map(|item| OrderLineRow {
            order_id: order.order_id,
            customer_id: order.customer_id,
            date: order.date,
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        })
    }

    pub fn item(&self) -> OrderItem {
        OrderItem {
            product_id: self.product_id,
            quantity: self.quantity,
            price: self.price,
        }
    }

    /// Whether this row carries the same order header as `order`.
    pub fn matches_header(&self, order: &Order) -> bool {
        self.customer_id == order.customer_id && self.date == order.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn order() -> Order {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let mut order = Order::new(OrderId::new(7), CustomerId::new(3), date);
        order.add_item(OrderItem {
            product_id: ProductId::new(1),
            quantity: 2,
            price: dec!(19.90),
        });
        order.add_item(OrderItem {
            product_id: ProductId::new(4),
            quantity: 1,
            price: dec!(5),
        });
        order
    }

    #[test]
    fn order_record_carries_total() {
        let record = OrderRecord::from(&order());
        assert_eq!(record.total_amount, Some(dec!(44.80)));
    }

    #[test]
    fn stated_total_does_not_override_items() {
        let mut record = OrderRecord::from(&order());
        record.total_amount = Some(dec!(1));
        let restored = Order::from(record);
        assert_eq!(restored, order());
        assert_eq!(restored.total_amount(), dec!(44.80));
    }

    #[test]
    fn order_flattens_to_one_row_per_item() {
        let order = order();
        let rows: Vec<OrderLineRow> = OrderLineRow::from_order(&order).collect();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.order_id == OrderId::new(7) && r.matches_header(&order)));
        assert_eq!(rows[1].item(), order.items[1]);
    }

    #[test]
    fn customer_row_is_validated() {
        let row = CustomerRow {
            customer_id: CustomerId::new(1),
            name: "Anna".into(),
            email: "not-an-email".into(),
            phone: "+79161234567".into(),
            address: String::new(),
        };
        assert!(matches!(Customer::try_from(row), Err(CoreError::InvalidEmail(_))));
    }
}
