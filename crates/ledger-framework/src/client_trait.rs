//! # ActorClient Trait
//!
//! Provides a common interface for record‑specific clients, adding default `get` and `list`
//! methods built on top of a generic `RecordClient`.
use crate::{FrameworkError, LedgerRecord, RecordClient};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the standard read operations.
///
/// # Example
///
/// ```rust
/// use ledger_framework::{ActorClient, FrameworkError, LedgerRecord, RecordClient};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Table { id: u32, seats: u32 }
/// #[derive(Clone, Debug)] enum TableAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TableError(String);
///
/// impl LedgerRecord for Table {
///     const KEY_PREFIX: &'static str = "table-";
///     type Id = u32;
///     type Action = TableAction;
///     type ActionResult = ();
///     type Error = TableError;
///     fn id(&self) -> &u32 { &self.id }
///     fn handle_action(&mut self, action: TableAction) -> Result<(), TableError> { match action {} }
/// }
///
/// struct TableClient { inner: RecordClient<Table> }
///
/// impl ActorClient<Table> for TableClient {
///     type Error = TableError;
///     fn inner(&self) -> &RecordClient<Table> { &self.inner }
///     fn map_error(e: FrameworkError) -> TableError { TableError(e.to_string()) }
/// }
///
/// async fn usage(client: TableClient) {
///     // get() and list() are provided automatically
///     let _ = client.get(1).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: LedgerRecord>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic RecordClient.
    fn inner(&self) -> &RecordClient<T>;

    /// Map framework errors to the specific record error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every decodable record, in key order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().scan().await.map_err(Self::map_error)
    }
}
