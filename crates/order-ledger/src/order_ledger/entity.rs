//! LedgerRecord trait implementation for the Order domain type.
//!
//! Orders are stored under `receipt-<receiptNumber>`. The transitions form a one-way lifecycle:
//!
//! ```text
//! Open ──(Accept)──▶ InProgress ──(Close)──▶ Closed
//! ```
//!
//! `Closed` is terminal; nothing moves an order back. Items may be appended until the order
//! is closed.

use super::actions::{CloseOutcome, OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::model::{Order, OrderItem, OrderStatus, ReceiptNumber};
use ledger_framework::LedgerRecord;

/// Storage key prefix for orders.
pub const RECEIPT_KEY_PREFIX: &str = "receipt-";

impl OrderItem {
    pub(crate) fn validate(&self) -> Result<(), OrderError> {
        if self.name.trim().is_empty() {
            return Err(OrderError::InvalidItem("item name is empty".into()));
        }
        if self.quantity == 0 {
            return Err(OrderError::InvalidItem(format!(
                "{} has quantity 0",
                self.name
            )));
        }
        Ok(())
    }
}

impl Order {
    fn receipt(&self) -> String {
        self.receipt_number.to_string()
    }
}

impl LedgerRecord for Order {
    const KEY_PREFIX: &'static str = RECEIPT_KEY_PREFIX;
    type Id = ReceiptNumber;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    fn id(&self) -> &ReceiptNumber {
        &self.receipt_number
    }

    /// Checks an order handed over by the order-taking flow.
    ///
    /// New orders must have a usable receipt number, valid items, and must not already be
    /// closed.
    fn validate(&self) -> Result<(), OrderError> {
        if !self.receipt_number.is_well_formed() {
            return Err(OrderError::InvalidReceipt(self.receipt()));
        }
        if self.status.is_terminal() {
            return Err(OrderError::AlreadyClosed(self.receipt()));
        }
        self.items.iter().try_for_each(OrderItem::validate)
    }

    /// Stored orders must still have a usable receipt number and valid items; anything else
    /// was written by something other than the ledger.
    fn check_stored(&self) -> Result<(), OrderError> {
        if !self.receipt_number.is_well_formed() {
            return Err(OrderError::InvalidReceipt(self.receipt()));
        }
        if self.status.is_terminal() && self.items.is_empty() {
            return Err(OrderError::EmptyOrder(self.receipt()));
        }
        self.items.iter().try_for_each(OrderItem::validate)
    }

    /// Applies a lifecycle transition.
    ///
    /// # Actions
    /// - `Accept`: `Open -> InProgress`; a no-op on `InProgress`
    /// - `AddItem`: appends to an `Open` or `InProgress` order
    /// - `Close`: `InProgress -> Closed`; a no-op on `Closed`
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::Accept => match self.status {
                OrderStatus::Open => {
                    self.status = OrderStatus::InProgress;
                    Ok(OrderActionResult::Accept(true))
                }
                OrderStatus::InProgress => Ok(OrderActionResult::Accept(false)),
                OrderStatus::Closed => Err(OrderError::AlreadyClosed(self.receipt())),
            },
            OrderAction::AddItem(item) => {
                if self.status.is_terminal() {
                    return Err(OrderError::AlreadyClosed(self.receipt()));
                }
                item.validate()?;
                self.items.push(item);
                Ok(OrderActionResult::AddItem(self.clone()))
            }
            OrderAction::Close => match self.status {
                OrderStatus::Closed => Ok(OrderActionResult::Close(CloseOutcome::AlreadyClosed)),
                OrderStatus::Open => Err(OrderError::InvalidTransition {
                    receipt: self.receipt(),
                    from: OrderStatus::Open,
                    to: OrderStatus::Closed,
                }),
                OrderStatus::InProgress if self.items.is_empty() => {
                    Err(OrderError::EmptyOrder(self.receipt()))
                }
                OrderStatus::InProgress => {
                    self.status = OrderStatus::Closed;
                    Ok(OrderActionResult::Close(CloseOutcome::Closed))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: OrderStatus) -> Order {
        Order::new("R1", 2u64, vec![OrderItem::new("Soup", 1)]).with_status(status)
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(Order::storage_key(&"R100".into()), "receipt-R100");
    }

    #[test]
    fn test_accept_then_close() {
        let mut o = order(OrderStatus::Open);
        assert_eq!(
            o.handle_action(OrderAction::Accept),
            Ok(OrderActionResult::Accept(true))
        );
        assert_eq!(
            o.handle_action(OrderAction::Accept),
            Ok(OrderActionResult::Accept(false))
        );
        assert_eq!(
            o.handle_action(OrderAction::Close),
            Ok(OrderActionResult::Close(CloseOutcome::Closed))
        );
        assert_eq!(o.status, OrderStatus::Closed);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut o = order(OrderStatus::Closed);
        let before = o.clone();
        assert_eq!(
            o.handle_action(OrderAction::Close),
            Ok(OrderActionResult::Close(CloseOutcome::AlreadyClosed))
        );
        assert_eq!(o, before);
    }

    #[test]
    fn test_closed_orders_are_immutable() {
        let mut o = order(OrderStatus::Closed);
        assert_eq!(
            o.handle_action(OrderAction::Accept),
            Err(OrderError::AlreadyClosed("R1".into()))
        );
        assert_eq!(
            o.handle_action(OrderAction::AddItem(OrderItem::new("Tea", 1))),
            Err(OrderError::AlreadyClosed("R1".into()))
        );
        assert_eq!(o.items.len(), 1);
    }

    #[test]
    fn test_open_order_cannot_skip_the_kitchen() {
        let mut o = order(OrderStatus::Open);
        assert!(matches!(
            o.handle_action(OrderAction::Close),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Open,
                to: OrderStatus::Closed,
                ..
            })
        ));
        assert_eq!(o.status, OrderStatus::Open);
    }

    #[test]
    fn test_empty_order_cannot_close() {
        let mut o = Order::new("R9", 1u64, vec![]).with_status(OrderStatus::InProgress);
        assert_eq!(
            o.handle_action(OrderAction::Close),
            Err(OrderError::EmptyOrder("R9".into()))
        );
    }

    #[test]
    fn test_add_item_validates() {
        let mut o = order(OrderStatus::InProgress);
        assert!(matches!(
            o.handle_action(OrderAction::AddItem(OrderItem::new("Tea", 0))),
            Err(OrderError::InvalidItem(_))
        ));
        match o.handle_action(OrderAction::AddItem(OrderItem::new("Tea", 2))) {
            Ok(OrderActionResult::AddItem(updated)) => {
                assert_eq!(updated.items.last(), Some(&OrderItem::new("Tea", 2)));
            }
            other => panic!("Expected AddItem result, got {other:?}"),
        }
    }

    #[test]
    fn test_stored_orders_keep_item_invariants() {
        assert!(order(OrderStatus::Closed).check_stored().is_ok());
        assert!(matches!(
            Order::new("R3", 1u64, vec![OrderItem::new("", 0)])
                .with_status(OrderStatus::InProgress)
                .check_stored(),
            Err(OrderError::InvalidItem(_))
        ));
        assert_eq!(
            Order::new("R4", 1u64, vec![])
                .with_status(OrderStatus::Closed)
                .check_stored(),
            Err(OrderError::EmptyOrder("R4".into()))
        );
    }

    #[test]
    fn test_validate_new_orders() {
        assert!(order(OrderStatus::Open).validate().is_ok());
        assert!(order(OrderStatus::InProgress).validate().is_ok());
        assert_eq!(
            order(OrderStatus::Closed).validate(),
            Err(OrderError::AlreadyClosed("R1".into()))
        );
        assert!(matches!(
            Order::new("", 1u64, vec![]).validate(),
            Err(OrderError::InvalidReceipt(_))
        ));
        assert!(matches!(
            Order::new("R2", 1u64, vec![OrderItem::new(" ", 1)]).validate(),
            Err(OrderError::InvalidItem(_))
        ));
    }
}
