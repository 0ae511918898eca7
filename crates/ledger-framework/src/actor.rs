//! # Generic Record Actor
//!
//! This module defines the `RecordActor`, the single writer that owns a storage backend for
//! one record type. It implements the "Server" side of the Actor Model, processing messages
//! sequentially so that no two requests from this process interleave on the same key.

use crate::client::RecordClient;
use crate::error::FrameworkError;
use crate::message::RecordRequest;
use crate::record::LedgerRecord;
use crate::storage::StorageBackend;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Number of times an action is re-applied after losing a compare-and-swap race.
pub const DEFAULT_MAX_WRITE_RETRIES: u32 = 8;

/// The generic actor that owns every record of type `T` in a storage backend.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the backend handle and the
/// receiver end of the channel; the [`RecordClient`] half can be cloned freely.
///
/// **Concurrency Model**:
/// Inside one process, requests are processed one at a time in a loop, so a read-modify-write
/// never interleaves with another request from the same actor. Across processes (or across
/// several actors sharing one backend) the write step is a compare-and-swap against the value
/// that was read. If another writer got there first, the action is re-applied to the fresh
/// value, up to `max_write_retries` extra times.
///
/// # Usage Pattern
///
/// ```rust
/// use ledger_framework::{LedgerRecord, MemoryBackend, RecordActor};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Counter { id: u32, value: u32 }
///
/// #[derive(Clone, Debug)] enum CounterAction { Bump }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// impl LedgerRecord for Counter {
///     const KEY_PREFIX: &'static str = "counter-";
///     type Id = u32;
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Error = CounterError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn handle_action(&mut self, _: CounterAction) -> Result<u32, CounterError> {
///         self.value += 1;
///         Ok(self.value)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = RecordActor::<Counter>::new(10, MemoryBackend::new());
///     tokio::spawn(actor.run());
///
///     client.insert(Counter { id: 1, value: 0 }).await.unwrap();
///     assert_eq!(client.perform_action(1, CounterAction::Bump).await.unwrap(), 1);
/// }
/// ```
///
/// ## Operations
///
/// * **Insert**: validate, encode, compare-and-swap against "absent". If the key is taken by
///   an equal record (compared after decoding) the insert is a no-op; otherwise
///   `AlreadyExists`, or `Malformed` when the stored value is unreadable.
/// * **Get**: read and decode one key. Values that fail to decode or fail
///   [`LedgerRecord::check_stored`] are reported as `Malformed`.
/// * **Scan**: list keys by prefix, decode each, skip (and log) the ones that fail.
/// * **Action**: read, decode, `handle_action`, encode, compare-and-swap. Unchanged records
///   are not rewritten.
pub struct RecordActor<T: LedgerRecord> {
    receiver: mpsc::Receiver<RecordRequest<T>>,
    backend: Box<dyn StorageBackend>,
    max_write_retries: u32,
}

impl<T: LedgerRecord> RecordActor<T> {
    /// Creates a new `RecordActor` over `backend` and its associated `RecordClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `backend` - The storage this actor reads and writes. Injected so tests and
    ///   deployments can choose memory or file storage.
    pub fn new(buffer_size: usize, backend: impl StorageBackend) -> (Self, RecordClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            backend: Box::new(backend),
            max_write_retries: DEFAULT_MAX_WRITE_RETRIES,
        };
        let client = RecordClient::new(sender);
        (actor, client)
    }

    pub fn with_max_write_retries(mut self, retries: u32) -> Self {
        self.max_write_retries = retries;
        self
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Order" instead of "order_ledger::model::order::Order")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, prefix = T::KEY_PREFIX, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RecordRequest::Insert { record, respond_to } => {
                    debug!(entity_type, ?record, "Insert");
                    let id = record.id().clone();
                    let result = self.insert(record);
                    match &result {
                        Ok(()) => info!(entity_type, %id, "Stored"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Insert failed"),
                    }
                    let _ = respond_to.send(result);
                }
                RecordRequest::Get { id, respond_to } => {
                    let result = self.get(&id);
                    let found = matches!(result, Ok(Some(_)));
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(result);
                }
                RecordRequest::Scan { respond_to } => {
                    let result = self.scan(entity_type);
                    if let Ok(records) = &result {
                        debug!(entity_type, size = records.len(), "Scan");
                    }
                    let _ = respond_to.send(result);
                }
                RecordRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.apply(&id, action);
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, "Shutdown");
    }

    fn decode(key: &str, raw: &str) -> Result<T, FrameworkError> {
        let record: T = serde_json::from_str(raw).map_err(|e| FrameworkError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        if T::storage_key(record.id()) != key {
            return Err(FrameworkError::Malformed {
                key: key.to_string(),
                reason: format!("stored id {} does not match its key", record.id()),
            });
        }
        record.check_stored().map_err(|e| FrameworkError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(record)
    }

    fn insert(&self, record: T) -> Result<(), FrameworkError> {
        record
            .validate()
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        let key = T::storage_key(record.id());
        let encoded = serde_json::to_string(&record)?;

        if self.backend.compare_and_swap(&key, None, &encoded)? {
            return Ok(());
        }
        // Re-storing the same record is not a collision, whatever spelling it was stored in.
        let Some(existing) = self.backend.get(&key)? else {
            return Err(FrameworkError::WriteConflict { key, attempts: 1 });
        };
        let stored = Self::decode(&key, &existing)?;
        if serde_json::to_string(&stored)? == encoded {
            Ok(())
        } else {
            Err(FrameworkError::AlreadyExists(record.id().to_string()))
        }
    }

    fn get(&self, id: &T::Id) -> Result<Option<T>, FrameworkError> {
        let key = T::storage_key(id);
        match self.backend.get(&key)? {
            Some(raw) => Self::decode(&key, &raw).map(Some),
            None => Ok(None),
        }
    }

    fn scan(&self, entity_type: &str) -> Result<Vec<T>, FrameworkError> {
        let mut records = Vec::new();
        for key in self.backend.keys_with_prefix(T::KEY_PREFIX)? {
            let Some(raw) = self.backend.get(&key)? else {
                continue;
            };
            match Self::decode(&key, &raw) {
                Ok(record) => records.push(record),
                Err(e) => warn!(entity_type, key = %key, error = %e, "Skipping malformed record"),
            }
        }
        Ok(records)
    }

    fn apply(&self, id: &T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let key = T::storage_key(id);
        let attempts = self.max_write_retries.saturating_add(1);

        for attempt in 1..=attempts {
            let raw = self
                .backend
                .get(&key)?
                .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
            let mut record = Self::decode(&key, &raw)?;
            let result = record
                .handle_action(action.clone())
                .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

            let encoded = serde_json::to_string(&record)?;
            if encoded == raw || self.backend.compare_and_swap(&key, Some(&raw), &encoded)? {
                return Ok(result);
            }
            debug!(key = %key, attempt, "Write conflict, re-reading");
        }

        Err(FrameworkError::WriteConflict { key, attempts })
    }
}
