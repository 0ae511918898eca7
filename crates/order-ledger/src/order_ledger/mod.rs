//! # Order Ledger
//!
//! This module makes [`Order`] a ledger record: the storage key layout, the lifecycle
//! transitions, and the error taxonomy.
//!
//! ## Structure
//!
//! - [`entity`] - [`LedgerRecord`](ledger_framework::LedgerRecord) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`actions`] - [`OrderAction`] and [`OrderActionResult`] for status transitions
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use ledger_framework::MemoryBackend;
//! use order_ledger::clients::OrderClient;
//! use order_ledger::model::{Order, OrderItem};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = order_ledger::order_ledger::new(MemoryBackend::new(), 32, 8);
//!     let client = OrderClient::new(generic_client);
//!     tokio::spawn(actor.run());
//!
//!     client
//!         .store_order(Order::new("R1", 4u64, vec![OrderItem::new("Soup", 1)]))
//!         .await?;
//!     client.accept_order("R1".into()).await?;
//!     client.close_order("R1".into()).await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::RECEIPT_KEY_PREFIX;
pub use error::*;

use crate::model::Order;
use ledger_framework::{RecordActor, RecordClient, StorageBackend};

/// Creates a new Order actor over `backend` and its client.
pub fn new(
    backend: impl StorageBackend,
    buffer_size: usize,
    max_write_retries: u32,
) -> (RecordActor<Order>, RecordClient<Order>) {
    let (actor, client) = RecordActor::new(buffer_size, backend);
    (actor.with_max_write_retries(max_write_retries), client)
}
