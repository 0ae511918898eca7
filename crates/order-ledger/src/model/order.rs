//! # Order Model
//!
//! The persisted order record and its identifiers.
//!
//! [`Order`] implements the [`LedgerRecord`](ledger_framework::LedgerRecord) trait, allowing it
//! to be owned by a [`RecordActor`](ledger_framework::RecordActor). See the implementation in
//! [`order_ledger::entity`](crate::order_ledger::entity) for the key layout
//! (`receipt-<receiptNumber>`) and the status transitions.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifiers arrive from the order-taking flow as either JSON strings or integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Text(String),
    Number(u64),
}

impl From<RawIdentifier> for String {
    fn from(raw: RawIdentifier) -> Self {
        match raw {
            RawIdentifier::Text(text) => text,
            RawIdentifier::Number(n) => n.to_string(),
        }
    }
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "RawIdentifier", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<RawIdentifier> for $name {
            fn from(raw: RawIdentifier) -> Self {
                Self(raw.into())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id.to_string())
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier! {
    /// Business identifier of an order. Assigned by the order-taking flow, never by the
    /// ledger, and doubles as the storage key suffix.
    ReceiptNumber
}

identifier! {
    /// The physical or logical table an order belongs to.
    TableNumber
}

impl ReceiptNumber {
    /// A receipt number is usable as a key suffix: non-empty, no whitespace, no path separators.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && !self
                .0
                .chars()
                .any(|c| c.is_whitespace() || c.is_control() || c == '/' || c == '\\')
    }
}

/// Lifecycle state of an order.
///
/// ```text
/// Open ──(accept)──▶ InProgress ──(close)──▶ Closed
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Open,
    #[serde(alias = "In Progress")]
    InProgress,
    Closed,
}

impl OrderStatus {
    /// Only accepted orders show up on the kitchen's active list.
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::InProgress)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Closed)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Open => "Open",
            OrderStatus::InProgress => "InProgress",
            OrderStatus::Closed => "Closed",
        };
        f.write_str(label)
    }
}

/// A single line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub receipt_number: ReceiptNumber,
    pub table_number: TableNumber,
    /// Kept in insertion order; tickets print them in this order.
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
}

impl Order {
    /// Creates a new `Open` order.
    ///
    /// # Arguments
    /// * `receipt_number` - Externally assigned receipt number
    /// * `table_number` - Table the order belongs to
    /// * `items` - Ordered items, in the order they should print
    pub fn new(
        receipt_number: impl Into<ReceiptNumber>,
        table_number: impl Into<TableNumber>,
        items: Vec<OrderItem>,
    ) -> Self {
        Self {
            receipt_number: receipt_number.into(),
            table_number: table_number.into(),
            items,
            status: OrderStatus::Open,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }
}
