//! # System Lifecycle
//!
//! This module starts the ledger, hands out its client, and shuts it down.
//!
//! ## The LedgerSystem Pattern
//!
//! [`LedgerSystem`] is the composition root:
//!
//! 1. **Storage** - open the backend named by [`LedgerConfig`](crate::config::LedgerConfig)
//! 2. **Actor Creation** - create the Order actor over that backend
//! 3. **Start** - spawn the actor's loop in its own Tokio task
//! 4. **Graceful Shutdown** - drop the client and await the task
//!
//! ## Graceful Shutdown
//!
//! The actor stops when its channel closes, i.e. when the last [`OrderClient`](crate::clients::OrderClient)
//! is dropped. [`LedgerSystem::shutdown`] drops the system's own client and waits; any clones
//! still held elsewhere keep the actor alive until they are dropped too.
//!
//! ## Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging for the process.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```

pub mod ledger_system;
pub mod tracing;

pub use self::ledger_system::*;
pub use self::tracing::*;
