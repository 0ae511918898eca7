//! Type-safe wrappers that hide the message passing behind domain methods.

pub mod order_client;

pub use order_client::OrderClient;
