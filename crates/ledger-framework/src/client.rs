//! # Generic Client
//!
//! This module defines the generic client for communicating with record actors.

use crate::error::FrameworkError;
use crate::message::RecordRequest;
use crate::record::LedgerRecord;
use tokio::sync::{mpsc, oneshot};

/// ## RecordClient
///
/// The `RecordClient<T>` provides a type‑safe, async API for interacting with a `RecordActor<T>`.
/// It forwards requests over a Tokio mpsc channel and returns results via oneshot channels.
/// The client holds only a sender, so cloning is inexpensive and clones can be shared across tasks.
/// Every value it returns is a copy; nothing hands out a reference into storage.
pub struct RecordClient<T: LedgerRecord> {
    sender: mpsc::Sender<RecordRequest<T>>,
}

impl<T: LedgerRecord> Clone for RecordClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: LedgerRecord> RecordClient<T> {
    pub fn new(sender: mpsc::Sender<RecordRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> RecordRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn insert(&self, record: T) -> Result<(), FrameworkError> {
        self.request(|respond_to| RecordRequest::Insert { record, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| RecordRequest::Get { id, respond_to })
            .await
    }

    pub async fn scan(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| RecordRequest::Scan { respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| RecordRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
