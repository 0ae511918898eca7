//! # Ledger Framework
//!
//! This crate provides the building blocks for a single-writer record ledger: a store of
//! serialised records, one key per record, owned by an actor that is the only component
//! allowed to touch those keys.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers:
//!
//! 1. **Record Layer** ([`LedgerRecord`]) - Your domain type, its key prefix and its transitions
//! 2. **Storage Layer** ([`StorageBackend`]) - A shared string key-value store with compare-and-swap
//! 3. **Runtime Layer** ([`RecordActor`]) - Sequential message processing and read-modify-write
//! 4. **Interface Layer** ([`RecordClient`], [`ActorClient`]) - Type-safe async communication
//!
//! You write the transition rules **once** in [`LedgerRecord::handle_action`]; the framework
//! handles encoding, key layout, conflict retries, and the message plumbing.
//!
//! ## Storage Is Shared
//!
//! A browser origin's local storage, a directory on disk, or a networked key-value service are
//! all shared with writers this process does not control. The actor therefore never
//! blind-writes: inserts are "write if absent", updates are "write if still equal to what I
//! read". A record type gets this behaviour without doing anything.
//!
//! ## Corrupt Values
//!
//! A value that fails to decode is a problem with that one record. `Get` and `Action` on it
//! report [`FrameworkError::Malformed`]; `Scan` skips it with a `warn!` event and returns the
//! rest.
//!
//! ## Testing
//!
//! The [`mock`] module provides a `MockClient` that answers requests from a queue of
//! expectations, for testing client wrappers without spawning an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;
pub mod storage;

// Re-export core types for convenience
pub use actor::{RecordActor, DEFAULT_MAX_WRITE_RETRIES};
pub use client::RecordClient;
pub use client_trait::ActorClient;
pub use error::{FrameworkError, StorageError};
pub use message::{RecordRequest, Response};
pub use record::LedgerRecord;
pub use storage::{FileBackend, MemoryBackend, StorageBackend};
