//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup (with the key prefix it owns) and shutdown
//! - **Record Operations**: Insert, Get, Scan, Action, with `entity_type` and `id` fields
//! - **Skipped Records**: `warn` for every stored value a scan could not decode
//! - **Client Calls**: one span per `OrderClient` method, carrying the receipt number
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Actor started entity_type="Order" prefix="receipt-"
//! INFO Stored entity_type="Order" id=R100
//! INFO kitchen: Kitchen order ticket receipt=R100 table=5 items=Burger x2, Fries x1
//! INFO Action ok entity_type="Order" id=R100
//! INFO kitchen:close_order: Order closed receipt=ReceiptNumber("R100")
//! ```
//!
//! Actor events carry no client span: the actor runs in its own task.
//!
//! **With `RUST_LOG=debug`** the first line of each operation also carries the full payload,
//! e.g. `DEBUG Insert record=Order { receipt_number: ReceiptNumber("R100"), .. }`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
