use core_types::{CoreError, EntityKind, OrderId, ProductId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] CoreError),

    #[error("{kind} {id} was not found.")]
    NotFound { kind: EntityKind, id: u32 },

    #[error("{kind} {id} already exists.")]
    DuplicateId { kind: EntityKind, id: u32 },

    #[error("{kind} {id} is referenced by order {order_id} and cannot be removed.")]
    ReferentialIntegrity {
        kind: EntityKind,
        id: u32,
        order_id: OrderId,
    },

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}.")]
    InsufficientStock {
        product_id: ProductId,
        requested: u64,
        available: u64,
    },

    #[error("Failed to access the data directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("An error occurred during JSON serialization/deserialization of {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn not_found(kind: EntityKind, id: impl Into<u32>) -> Self {
        StoreError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub(crate) fn duplicate(kind: EntityKind, id: impl Into<u32>) -> Self {
        StoreError::DuplicateId {
            kind,
            id: id.into(),
        }
    }
}
