//! # Mock Framework & Testing Guide
//!
//! The `MockClient<T>` type hands out a real `RecordClient<T>` whose requests are answered from
//! a queue of expectations instead of a storage backend. It lets you test logic *around* the
//! client (error mapping, filtering, result shaping) without spawning an actor.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state over a backend |
//! | **Use Case** | Unit testing logic *around* the client | Testing the actor itself or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific stored state) |
//!
//! ## Example
//!
//! ```rust
//! use ledger_framework::mock::MockClient;
//! use ledger_framework::{FrameworkError, LedgerRecord};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
//! struct Tab { id: u32, total: u32 }
//! #[derive(Clone, Debug)] enum TabAction {}
//! #[derive(Debug, thiserror::Error)] #[error("tab error")] struct TabError;
//!
//! impl LedgerRecord for Tab {
//!     const KEY_PREFIX: &'static str = "tab-";
//!     type Id = u32; type Action = TabAction; type ActionResult = (); type Error = TabError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn handle_action(&mut self, action: TabAction) -> Result<(), TabError> { match action {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Tab>::new();
//!     mock.expect_get(1).return_ok(Some(Tab { id: 1, total: 40 }));
//!     mock.expect_get(2).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(1).await.unwrap().unwrap().total, 40);
//!     assert!(matches!(client.get(2).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and a receiver, or use the fluent [`MockClient`] API.

use crate::client::RecordClient;
use crate::error::FrameworkError;
use crate::message::RecordRequest;
use crate::record::LedgerRecord;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to send back for it.
enum Expectation<T: LedgerRecord> {
    Insert {
        response: Result<(), FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Scan {
        response: Result<Vec<T>, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were registered. A request whose kind
/// or id does not match the next expectation panics the background task, which surfaces in
/// the test as `ActorDropped`.
pub struct MockClient<T: LedgerRecord> {
    client: RecordClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: LedgerRecord> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LedgerRecord> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<RecordRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        RecordRequest::Insert { respond_to, .. },
                        Some(Expectation::Insert { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        RecordRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Get for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (RecordRequest::Scan { respond_to }, Some(Expectation::Scan { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        RecordRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Action for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: RecordClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> RecordClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back(expectation);
    }

    /// Expects an `insert` operation.
    pub fn expect_insert(&mut self) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, |response| Expectation::Insert { response })
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, move |response| Expectation::Get { id, response })
    }

    /// Expects a `scan` operation.
    pub fn expect_scan(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, |response| Expectation::Scan { response })
    }

    /// Expects an `action` operation on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder::new(self, move |response| Expectation::Action { id, response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder that records the response for one expectation.
pub struct ExpectationBuilder<'a, T: LedgerRecord, R> {
    mock: &'a MockClient<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a>,
}

impl<'a, T: LedgerRecord, R> ExpectationBuilder<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.build)(Err(error)));
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// The test plays the actor: it pulls requests off `receiver`, inspects them, and answers on
/// the oneshot sender. Useful when the assertion is about *what* the client sent.
///
/// **Note**: Consider using [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: LedgerRecord>(
    buffer_size: usize,
) -> (RecordClient<T>, mpsc::Receiver<RecordRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RecordClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert<T: LedgerRecord>(
    receiver: &mut mpsc::Receiver<RecordRequest<T>>,
) -> Option<(T, oneshot::Sender<Result<(), FrameworkError>>)> {
    match receiver.recv().await {
        Some(RecordRequest::Insert { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: LedgerRecord>(
    receiver: &mut mpsc::Receiver<RecordRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(RecordRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: LedgerRecord>(
    receiver: &mut mpsc::Receiver<RecordRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(RecordRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
