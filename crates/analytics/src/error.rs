use chrono::NaiveDate;
use core_types::{CustomerId, OrderId, ProductId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Order data references product {0}, which is not in the product list")]
    UnknownProduct(ProductId),

    #[error("Order data references customer {0}, which is not in the customer list")]
    UnknownCustomer(CustomerId),

    #[error("Revenue overflowed while adding order {0}")]
    RevenueOverflow(OrderId),
}
