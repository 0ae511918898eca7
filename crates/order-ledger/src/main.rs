//! # Order Ledger Demo
//!
//! Walks one order through the ledger: store, list, print the kitchen ticket, close.
//!
//! ```bash
//! RUST_LOG=info cargo run -p order-ledger
//! ORDER_LEDGER_CONFIG=ledger.yaml RUST_LOG=debug cargo run -p order-ledger
//! ```

use order_ledger::clients::OrderClient;
use order_ledger::config::LedgerConfig;
use order_ledger::lifecycle::{setup_tracing, LedgerSystem};
use order_ledger::model::{Order, OrderItem, OrderStatus};
use order_ledger::order_ledger::OrderError;
use order_ledger::printing::{TicketPrinter, TracingPrinter};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = LedgerConfig::from_env().map_err(|e| e.to_string())?;
    let system = LedgerSystem::start(&config).map_err(|e| e.to_string())?;
    let ledger = &system.order_client;

    let order = Order::new(
        "R100",
        5u64,
        vec![OrderItem::new("Burger", 2), OrderItem::new("Fries", 1)],
    )
    .with_status(OrderStatus::InProgress);

    match ledger.store_order(order).await {
        Ok(()) => info!("Order stored"),
        // A file-backed ledger keeps R100 from a previous run
        Err(OrderError::DuplicateReceipt(receipt)) => info!(%receipt, "Order already on file"),
        Err(e) => return Err(e.to_string()),
    }

    let span = tracing::info_span!("kitchen");
    async {
        let active = ledger.list_active_orders().await?;
        info!(count = active.len(), "Active orders");

        for order in &active {
            let ticket = OrderClient::build_kitchen_ticket(order)?;
            if let Err(e) = TracingPrinter.print(&ticket) {
                error!(error = %e, "Printing failed");
            }
        }

        ledger.close_order("R100".into()).await?;
        let closed = ledger.get_order("R100".into()).await?;
        info!(status = %closed.status, "Order after close");

        let remaining = ledger.list_active_orders().await?;
        info!(count = remaining.len(), "Active orders after close");
        Ok::<_, OrderError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    system.shutdown().await.map_err(|e| e.to_string())?;
    info!("Application completed successfully");
    Ok(())
}
