//! Pure data structures: the persisted [`Order`] record and the [`KitchenTicket`] projection.

pub mod order;
pub mod ticket;

pub use order::*;
pub use ticket::*;
