//! # Order Ledger
//!
//! The local order ledger and receipt lifecycle of a restaurant point-of-sale system.
//!
//! The ledger owns every persisted order, keyed by receipt number (`receipt-<receiptNumber>`).
//! The rest of the application goes through [`OrderClient`](clients::OrderClient) to list the
//! kitchen's active orders, move orders through their lifecycle, and derive kitchen order
//! tickets. Rendering and printing stay outside, behind [`TicketPrinter`](printing::TicketPrinter).
//!
//! ## Modules
//!
//! - **[model]**: [`Order`](model::Order), its identifiers and status, and the
//!   [`KitchenTicket`](model::KitchenTicket) projection.
//! - **[order_ledger]**: the record implementation: key layout, transitions, [`OrderError`](order_ledger::OrderError).
//! - **[clients]**: the consumer API.
//! - **[config]**: YAML configuration and storage selection.
//! - **[lifecycle]**: starting, wiring, and stopping the ledger; tracing setup.
//! - **[printing]**: the printer seam.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_ledger;
pub mod printing;
