//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `RecordClient` and `RecordActor`.

use crate::error::FrameworkError;
use crate::record::LedgerRecord;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The set is deliberately narrow: records are inserted once, read by id, scanned by key
/// prefix, and mutated only through a record-specific [`LedgerRecord::Action`]. There is no
/// raw overwrite and no delete, so every write passes through the record's own transition
/// rules.
///
/// - **Insert**: first write of a record. Fails with `AlreadyExists` if a different value
///   already occupies the key.
/// - **Get**: fetch a copy of one record.
/// - **Scan**: fetch copies of every decodable record of this type, in key order.
/// - **Action**: atomic read-modify-write of one record.
#[derive(Debug)]
pub enum RecordRequest<T: LedgerRecord> {
    Insert {
        record: T,
        respond_to: Response<()>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Scan {
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
