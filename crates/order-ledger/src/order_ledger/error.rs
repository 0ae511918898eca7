//! Error types for the Order ledger.

use crate::model::OrderStatus;
use ledger_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// No order is stored under the receipt number.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order is closed and can no longer change.
    #[error("Order already closed: {0}")]
    AlreadyClosed(String),

    /// A different order is already stored under the receipt number.
    #[error("Duplicate receipt number: {0}")]
    DuplicateReceipt(String),

    /// The stored value could not be decoded as an order.
    #[error("Malformed order record at {key}: {reason}")]
    MalformedRecord { key: String, reason: String },

    /// The requested status change is not an edge of the lifecycle.
    #[error("Order {receipt} cannot go from {from} to {to}")]
    InvalidTransition {
        receipt: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// The order has no items, so it cannot be closed or printed.
    #[error("Order has no items: {0}")]
    EmptyOrder(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Invalid receipt number: {0:?}")]
    InvalidReceipt(String),

    /// The storage backend failed or kept losing write races.
    #[error("Order storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::AlreadyExists(id) => OrderError::DuplicateReceipt(id),
            FrameworkError::Malformed { key, reason } => OrderError::MalformedRecord { key, reason },
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(order_error) => *order_error,
                Err(other) => OrderError::ActorCommunicationError(other.to_string()),
            },
            e @ (FrameworkError::Storage(_)
            | FrameworkError::WriteConflict { .. }
            | FrameworkError::Codec(_)) => OrderError::Storage(e.to_string()),
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                OrderError::ActorCommunicationError(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_errors_keep_their_variant() {
        let wrapped = FrameworkError::EntityError(Box::new(OrderError::EmptyOrder("R1".into())));
        assert_eq!(OrderError::from(wrapped), OrderError::EmptyOrder("R1".into()));
    }

    #[test]
    fn test_framework_errors_map_to_ledger_taxonomy() {
        assert_eq!(
            OrderError::from(FrameworkError::AlreadyExists("R1".into())),
            OrderError::DuplicateReceipt("R1".into())
        );
        assert_eq!(
            OrderError::from(FrameworkError::NotFound("R2".into())),
            OrderError::NotFound("R2".into())
        );
        assert!(matches!(
            OrderError::from(FrameworkError::WriteConflict {
                key: "receipt-R1".into(),
                attempts: 9
            }),
            OrderError::Storage(_)
        ));
        assert!(matches!(
            OrderError::from(FrameworkError::ActorClosed),
            OrderError::ActorCommunicationError(_)
        ));
    }
}
