//! # Mock Store
//!
//! Test helpers for client wrappers that should be exercised without a real
//! actor or real storage.
//!
//! Two styles are available:
//!
//! - **Channel inspection**: [`create_mock_client`] returns a client plus the
//!   receiving end of its channel. The test pulls requests with
//!   [`expect_create`], [`expect_get`], [`expect_update`] or [`expect_action`],
//!   asserts on them and answers through the returned responder.
//! - **Scripted expectations**: [`MockClient`] answers requests from a queue
//!   of canned responses and panics on anything it did not expect.
//!
//! ```rust
//! use record_framework::mock::MockClient;
//! use record_framework::{RecordEntity, StoreError};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
//! struct Tag { id: String }
//! #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
//!
//! impl RecordEntity for Tag {
//!     type Id = String; type Create = (); type Update = (); type Action = ();
//!     type ActionResult = (); type Error = TagError;
//!     fn id(&self) -> &String { &self.id }
//!     fn from_create_params(id: String, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
//!     fn on_update(&mut self, _: ()) -> Result<(), TagError> { Ok(()) }
//!     fn handle_action(&mut self, _: ()) -> Result<(), TagError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Tag>::new();
//!     mock.expect_get("tag_1".to_string()).return_ok(Tag { id: "tag_1".into() });
//!     mock.expect_get("tag_2".to_string()).return_err(StoreError::NotFound("tag_2".into()));
//!
//!     let client = mock.client();
//!     assert!(client.get("tag_1".to_string()).await.is_ok());
//!     assert!(matches!(client.get("tag_2".to_string()).await, Err(StoreError::NotFound(_))));
//!     mock.verify();
//! }
//! ```

use crate::{RecordEntity, StoreClient, StoreError, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// SCRIPTED EXPECTATIONS
// =============================================================================

enum Expectation<T: RecordEntity> {
    List(Result<Vec<T>, StoreError>),
    Create(Result<T, StoreError>),
    Get {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client answering from a queue of expectations, in order.
pub struct MockClient<T: RecordEntity> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: RecordEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside
    /// a tokio runtime.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (StoreRequest::List { respond_to }, Some(Expectation::List(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Create { respond_to, .. }, Some(Expectation::Create(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        assert_eq!(id, want, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        assert_eq!(id, want, "delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: want, response })) => {
                        assert_eq!(id, want, "action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (request, _) => panic!("Unexpected request or expectation mismatch: {request:?}"),
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_list(&mut self) -> Respond<T, Vec<T>> {
        Respond::new(self.expectations.clone(), Expectation::List)
    }

    pub fn expect_create(&mut self) -> Respond<T, T> {
        Respond::new(self.expectations.clone(), Expectation::Create)
    }

    pub fn expect_get(&mut self, id: T::Id) -> Respond<T, T> {
        Respond::new(self.expectations.clone(), move |response| Expectation::Get { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Respond<T, ()> {
        Respond::new(self.expectations.clone(), move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> Respond<T, T::ActionResult> {
        Respond::new(self.expectations.clone(), move |response| Expectation::Action { id, response })
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder that completes an expectation with its canned response.
pub struct Respond<T: RecordEntity, R> {
    queue: Queue<T>,
    build: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: RecordEntity, R> Respond<T, R> {
    fn new(
        queue: Queue<T>,
        build: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            queue,
            build: Box::new(build),
        }
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.build)(response);
        self.queue.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// CHANNEL INSPECTION
// =============================================================================

type Responder<R> = oneshot::Sender<Result<R, StoreError>>;

/// Creates a client whose requests land on the returned receiver.
pub fn create_mock_client<T: RecordEntity>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: RecordEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Create, Responder<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: RecordEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Responder<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Update request.
pub async fn expect_update<T: RecordEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Update, Responder<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: RecordEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult>)> {
    match receiver.recv().await {
        Some(StoreRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
