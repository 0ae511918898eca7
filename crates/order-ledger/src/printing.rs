//! # Ticket Printing
//!
//! The ledger never opens a display or talks to a printer. It hands a [`KitchenTicket`] to a
//! [`TicketPrinter`], which owns the output surface.

use crate::model::KitchenTicket;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Printer unavailable: {0}")]
    Unavailable(String),
}

/// Output surface for kitchen tickets (browser print dialog, thermal printer, log, ...).
pub trait TicketPrinter: Send + Sync {
    fn print(&self, ticket: &KitchenTicket) -> Result<(), PrintError>;
}

/// Emits each ticket as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPrinter;

impl TicketPrinter for TracingPrinter {
    fn print(&self, ticket: &KitchenTicket) -> Result<(), PrintError> {
        info!(
            receipt = %ticket.receipt_number,
            table = %ticket.table_number,
            items = %ticket.text,
            "Kitchen order ticket"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{build_kitchen_ticket, Order, OrderItem};
    use std::sync::Mutex;

    /// Keeps every ticket it is handed.
    #[derive(Default)]
    struct RecordingPrinter {
        printed: Mutex<Vec<String>>,
    }

    impl TicketPrinter for RecordingPrinter {
        fn print(&self, ticket: &KitchenTicket) -> Result<(), PrintError> {
            self.printed
                .lock()
                .map_err(|_| PrintError::Unavailable("poisoned".into()))?
                .push(ticket.to_string());
            Ok(())
        }
    }

    struct OfflinePrinter;

    impl TicketPrinter for OfflinePrinter {
        fn print(&self, _: &KitchenTicket) -> Result<(), PrintError> {
            Err(PrintError::Unavailable("paper out".into()))
        }
    }

    fn ticket() -> KitchenTicket {
        let order = Order::new("R12", 3u64, vec![OrderItem::new("Ramen", 2)]);
        build_kitchen_ticket(&order).unwrap()
    }

    #[test]
    fn test_printers_behind_the_trait() {
        let recording = RecordingPrinter::default();
        let printers: [&dyn TicketPrinter; 2] = [&TracingPrinter, &recording];
        for printer in printers {
            printer.print(&ticket()).unwrap();
        }

        let printed = recording.printed.lock().unwrap();
        assert_eq!(printed.len(), 1);
        assert_eq!(
            printed[0],
            "Receipt Number: R12\nTable Number: 3\nItems: Ramen x2"
        );
    }

    #[test]
    fn test_printer_failure_is_reported() {
        assert!(matches!(
            OfflinePrinter.print(&ticket()),
            Err(PrintError::Unavailable(reason)) if reason == "paper out"
        ));
    }
}
