use chrono::NaiveDate;
use core_types::{CustomerId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline sales figures for a set of orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_revenue: Decimal,
    pub order_count: usize,
    /// Units sold across all line items.
    pub items_sold: u64,
    /// Revenue per order, rounded to cents. Zero when there are no orders.
    pub average_order_value: Decimal,
    pub distinct_customers: usize,
}

impl SalesSummary {
    /// Creates a new, zeroed-out summary.
    pub fn new() -> Self {
        Self {
            total_revenue: Decimal::ZERO,
            order_count: 0,
            items_sold: 0,
            average_order_value: Decimal::ZERO,
            distinct_customers: 0,
        }
    }
}

impl Default for SalesSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Sales of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStat {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u64,
    pub revenue: Decimal,
}

/// Purchasing activity of one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerStat {
    pub customer_id: CustomerId,
    pub name: String,
    pub order_count: usize,
    pub total_spent: Decimal,
}

/// One bucket of a sales trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// First day of the bucket (the day itself, the Monday, or the 1st of the month).
    pub period_start: NaiveDate,
    pub order_count: usize,
    pub revenue: Decimal,
}
