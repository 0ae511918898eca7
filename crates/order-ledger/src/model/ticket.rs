//! # Kitchen Order Ticket
//!
//! A [`KitchenTicket`] is the print-ready projection of an [`Order`]. Building one is a pure
//! function of the order value: no storage access, no display surface. Rendering or printing
//! the ticket is the job of a [`TicketPrinter`](crate::printing::TicketPrinter).

use crate::model::{Order, OrderItem, ReceiptNumber, TableNumber};
use crate::order_ledger::OrderError;
use serde::Serialize;
use std::fmt::Display;

/// Separator between item lines in [`KitchenTicket::text`].
pub const ITEM_DELIMITER: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenTicket {
    pub receipt_number: ReceiptNumber,
    pub table_number: TableNumber,
    /// One `"<name> x<quantity>"` entry per item, in order.
    pub lines: Vec<String>,
    /// `lines` joined with [`ITEM_DELIMITER`].
    pub text: String,
}

/// Derives the kitchen ticket for `order`.
///
/// Fails with [`OrderError::EmptyOrder`] when the order has no items, and with
/// [`OrderError::InvalidItem`] when an item has no name or a zero quantity.
pub fn build_kitchen_ticket(order: &Order) -> Result<KitchenTicket, OrderError> {
    if order.items.is_empty() {
        return Err(OrderError::EmptyOrder(order.receipt_number.to_string()));
    }
    order.items.iter().try_for_each(OrderItem::validate)?;
    let lines: Vec<String> = order
        .items
        .iter()
        .map(|item| format!("{} x{}", item.name, item.quantity))
        .collect();
    let text = lines.join(ITEM_DELIMITER);

    Ok(KitchenTicket {
        receipt_number: order.receipt_number.clone(),
        table_number: order.table_number.clone(),
        lines,
        text,
    })
}

impl Display for KitchenTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Receipt Number: {}", self.receipt_number)?;
        writeln!(f, "Table Number: {}", self.table_number)?;
        write!(f, "Items: {}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus;

    fn burger_order() -> Order {
        Order::new(
            "R100",
            5u64,
            vec![OrderItem::new("Burger", 2), OrderItem::new("Fries", 1)],
        )
        .with_status(OrderStatus::InProgress)
    }

    #[test]
    fn test_ticket_lines_keep_item_order() {
        let ticket = build_kitchen_ticket(&burger_order()).unwrap();

        assert_eq!(ticket.receipt_number.as_str(), "R100");
        assert_eq!(ticket.table_number.as_str(), "5");
        assert_eq!(ticket.lines, vec!["Burger x2", "Fries x1"]);
        assert_eq!(ticket.text, "Burger x2, Fries x1");
    }

    #[test]
    fn test_ticket_is_deterministic() {
        let order = burger_order();
        let before = order.clone();

        let first = build_kitchen_ticket(&order).unwrap();
        let second = build_kitchen_ticket(&order).unwrap();
        assert_eq!(first, second);
        assert_eq!(order, before);
    }

    #[test]
    fn test_empty_order_has_no_ticket() {
        let order = Order::new("R7", 1u64, vec![]);
        assert_eq!(
            build_kitchen_ticket(&order),
            Err(OrderError::EmptyOrder("R7".into()))
        );
    }

    #[test]
    fn test_invalid_items_have_no_ticket() {
        let order = Order::new("R8", 1u64, vec![OrderItem::new("Tea", 1), OrderItem::new("", 0)]);
        assert!(matches!(
            build_kitchen_ticket(&order),
            Err(OrderError::InvalidItem(_))
        ));
    }

    #[test]
    fn test_display_layout() {
        let ticket = build_kitchen_ticket(&burger_order()).unwrap();
        assert_eq!(
            ticket.to_string(),
            "Receipt Number: R100\nTable Number: 5\nItems: Burger x2, Fries x1"
        );
    }
}
