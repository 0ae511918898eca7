//! # LedgerRecord Trait
//!
//! The `LedgerRecord` trait defines the contract every persisted record must implement to be
//! owned by a [`RecordActor`](crate::RecordActor). It names the storage key prefix, the
//! identifier type, the record-specific actions and the record's error type.
//!
//! # Key Layout
//! Each record lives under exactly one storage key, `<KEY_PREFIX><id>`. The identifier is
//! therefore also the uniqueness constraint: two records with the same id collide on the same
//! key, and the actor refuses to overwrite one with the other.
//!
//! # Actions
//! All mutation goes through [`LedgerRecord::handle_action`]. The actor reads the current
//! value, decodes it, lets the record apply the action, and writes it back with a
//! compare-and-swap. An action may therefore run more than once if another writer raced it,
//! which is why `Action` must be `Clone` and `handle_action` must be a pure state transition.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that any persisted record must implement to be managed by a `RecordActor`.
pub trait LedgerRecord:
    Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Prefix shared by every storage key of this record type (e.g. `"receipt-"`).
    const KEY_PREFIX: &'static str;

    /// The unique identifier for this record. Its `Display` form is the key suffix.
    type Id: Clone + Eq + Send + Sync + Display + Debug;

    /// Enum representing record-specific transitions (e.g. `Close`).
    type Action: Clone + Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The error type for this record.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier stored inside the record.
    fn id(&self) -> &Self::Id;

    /// Checks the record before it is first stored.
    fn validate(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Checks a record read back from storage. Records that fail are treated as malformed:
    /// skipped by scans and reported by `Get` and `Action`.
    fn check_stored(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a record-specific transition to a freshly decoded copy.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;

    /// The storage key for a given id.
    fn storage_key(id: &Self::Id) -> String {
        format!("{}{}", Self::KEY_PREFIX, id)
    }
}
