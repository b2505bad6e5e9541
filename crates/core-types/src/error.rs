use crate::ids::OrderId;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Invalid phone number: '{0}'")]
    InvalidPhone(String),

    #[error("Price cannot be negative (got {0})")]
    NegativePrice(Decimal),

    #[error("Line item quantity must be at least 1")]
    ZeroQuantity,

    #[error("An order must contain at least one line item")]
    EmptyOrder,

    #[error("The total of order {0} is too large to represent")]
    AmountOverflow(OrderId),
}

impl CoreError {
    /// Shorthand for a blank required text field.
    pub(crate) fn blank(field: &str) -> Self {
        CoreError::InvalidInput(field.to_string(), "must not be blank".to_string())
    }
}
