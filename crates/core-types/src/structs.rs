use crate::contact::{Email, Phone};
use crate::error::CoreError;
use crate::ids::{CustomerId, OrderId, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer who places orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    pub address: String,
}

impl Customer {
    /// Builds a customer from raw user input, validating every field.
    pub fn new(
        customer_id: CustomerId,
        name: &str,
        email: &str,
        phone: &str,
        address: &str,
    ) -> Result<Self, CoreError> {
        let customer = Self {
            customer_id,
            name: name.trim().to_string(),
            email: Email::parse(email)?,
            phone: Phone::parse(phone)?,
            address: address.trim().to_string(),
        };
        customer.validate()?;
        Ok(customer)
    }

    /// Checks the fields the type system cannot enforce.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::blank("name"));
        }
        Ok(())
    }
}

/// A catalog item that can be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub stock: u32,
}

impl Product {
    pub fn new(
        product_id: ProductId,
        name: &str,
        price: Decimal,
        category: &str,
        stock: u32,
    ) -> Result<Self, CoreError> {
        let product = Self {
            product_id,
            name: name.trim().to_string(),
            price,
            category: category.trim().to_string(),
            stock,
        };
        product.validate()?;
        Ok(product)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::blank("name"));
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(CoreError::NegativePrice(self.price));
        }
        Ok(())
    }

    /// Adds `delta` units to the stock (removes them when negative).
    /// The stock never drops below zero.
    pub fn adjust_stock(&mut self, delta: i64) {
        let adjusted = i64::from(self.stock)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        self.stock = u32::try_from(adjusted).unwrap_or(u32::MAX);
    }
}

/// One line of an order: a product, how many, and the unit price at the
/// moment the line was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Unit price snapshot. Later catalog price changes do not alter it.
    pub price: Decimal,
}

impl OrderItem {
    /// Creates a line item priced at the product's current price.
    pub fn new(product: &Product, quantity: u32) -> Result<Self, CoreError> {
        let item = Self {
            product_id: product.product_id,
            quantity,
            price: product.price,
        };
        item.validate()?;
        Ok(item)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.quantity == 0 {
            return Err(CoreError::ZeroQuantity);
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(CoreError::NegativePrice(self.price));
        }
        Ok(())
    }

    /// Unit price times quantity, or `None` when it does not fit a `Decimal`.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// Unit price times quantity. Saturates at `Decimal::MAX`, which a
    /// validated order never reaches.
    pub fn total_price(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// A customer's order. The total is always derived from the line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Creates an empty order. Items are added with [`Order::add_item`].
    pub fn new(order_id: OrderId, customer_id: CustomerId, date: DateTime<Utc>) -> Self {
        Self {
            order_id,
            customer_id,
            date,
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    /// Sum of `price * quantity` over all line items, or `None` on overflow.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.checked_total()?))
    }

    /// Sum of `price * quantity` over all line items. Saturates like
    /// [`OrderItem::total_price`].
    pub fn total_amount(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.total_price()))
    }

    /// Total number of units across all line items.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn contains_product(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.items.is_empty() {
            return Err(CoreError::EmptyOrder);
        }
        self.items.iter().try_for_each(OrderItem::validate)?;
        if self.checked_total().is_none() {
            return Err(CoreError::AmountOverflow(self.order_id));
        }
        Ok(())
    }
}
