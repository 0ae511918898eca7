//! Status transitions for the Order ledger.
//!
//! This module defines the operations (Actions) that can change a stored
//! [`Order`](crate::model::Order). They are applied by
//! [`LedgerRecord::handle_action`](ledger_framework::LedgerRecord::handle_action) inside the
//! actor's read-modify-write, so the transition rules cannot be bypassed.

use crate::model::{Order, OrderItem};

/// Transitions for Order records.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// The kitchen accepts an order: `Open -> InProgress`.
    Accept,
    /// Appends an item to a not-yet-closed order.
    AddItem(OrderItem),
    /// Closes an order: `InProgress -> Closed`.
    ///
    /// # Errors
    /// Fails on an `Open` order or one with no items. Closing a closed order is not an error.
    Close,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// Result from Accept - `false` when the order was already in progress
    Accept(bool),
    /// Result from AddItem - the order after the append
    AddItem(Order),
    /// Result from Close
    Close(CloseOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    AlreadyClosed,
}
