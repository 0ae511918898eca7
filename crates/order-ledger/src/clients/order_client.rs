//! # Order Client
//!
//! Provides the ledger's consumer API. It wraps a `RecordClient<Order>` and is the only way the
//! rest of the application reads or changes orders; nothing else touches the `receipt-*` keys.
use crate::model::{build_kitchen_ticket, KitchenTicket, Order, OrderItem, ReceiptNumber};
use crate::order_ledger::{CloseOutcome, OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use ledger_framework::{ActorClient, FrameworkError, RecordClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order ledger.
///
/// Every value returned is a copy of the stored record; changes go through the transition
/// methods so the lifecycle rules are enforced in the actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: RecordClient<Order>,
}

impl OrderClient {
    pub fn new(inner: RecordClient<Order>) -> Self {
        Self { inner }
    }

    /// Receipt numbers that cannot name a stored order are refused before reaching storage.
    fn check_receipt(receipt: &ReceiptNumber) -> Result<(), OrderError> {
        if receipt.is_well_formed() {
            Ok(())
        } else {
            Err(OrderError::InvalidReceipt(receipt.to_string()))
        }
    }

    /// Stores a new order handed over by the order-taking flow.
    ///
    /// Fails with `DuplicateReceipt` if a different order already uses the receipt number.
    #[instrument(skip(self, order), fields(receipt = %order.receipt_number))]
    pub async fn store_order(&self, order: Order) -> Result<(), OrderError> {
        debug!(?order, "store_order called");
        self.inner.insert(order).await.map_err(Self::map_error)
    }

    /// Looks up one order.
    #[instrument(skip(self))]
    pub async fn get_order(&self, receipt: ReceiptNumber) -> Result<Order, OrderError> {
        Self::check_receipt(&receipt)?;
        debug!("Sending request");
        self.inner
            .get(receipt.clone())
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| OrderError::NotFound(receipt.to_string()))
    }

    /// Orders the kitchen is currently working on (`InProgress`), in receipt key order.
    ///
    /// Stored values that fail to decode are skipped and logged by the actor.
    #[instrument(skip(self))]
    pub async fn list_active_orders(&self) -> Result<Vec<Order>, OrderError> {
        let orders = self.list().await?;
        let active: Vec<Order> = orders
            .into_iter()
            .filter(|order| order.status.is_active())
            .collect();
        debug!(count = active.len(), "Active orders");
        Ok(active)
    }

    /// The kitchen accepts an order (`Open -> InProgress`).
    #[instrument(skip(self))]
    pub async fn accept_order(&self, receipt: ReceiptNumber) -> Result<(), OrderError> {
        Self::check_receipt(&receipt)?;
        match self
            .inner
            .perform_action(receipt, OrderAction::Accept)
            .await
        {
            Ok(OrderActionResult::Accept(changed)) => {
                debug!(changed, "Accepted");
                Ok(())
            }
            Ok(_) => unreachable!("Accept action must return Accept result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Appends an item to an order that is not closed and returns the updated order.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        receipt: ReceiptNumber,
        item: OrderItem,
    ) -> Result<Order, OrderError> {
        Self::check_receipt(&receipt)?;
        match self
            .inner
            .perform_action(receipt, OrderAction::AddItem(item))
            .await
        {
            Ok(OrderActionResult::AddItem(order)) => Ok(order),
            Ok(_) => unreachable!("AddItem action must return AddItem result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Closes an order. Closing an already closed order succeeds without writing anything.
    #[instrument(skip(self))]
    pub async fn close_order(&self, receipt: ReceiptNumber) -> Result<(), OrderError> {
        Self::check_receipt(&receipt)?;
        match self
            .inner
            .perform_action(receipt, OrderAction::Close)
            .await
        {
            Ok(OrderActionResult::Close(CloseOutcome::Closed)) => {
                info!("Order closed");
                Ok(())
            }
            Ok(OrderActionResult::Close(CloseOutcome::AlreadyClosed)) => {
                debug!("Order was already closed");
                Ok(())
            }
            Ok(_) => unreachable!("Close action must return Close result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Derives the kitchen ticket for an order. Pure: no storage access.
    pub fn build_kitchen_ticket(order: &Order) -> Result<KitchenTicket, OrderError> {
        build_kitchen_ticket(order)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &RecordClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}
