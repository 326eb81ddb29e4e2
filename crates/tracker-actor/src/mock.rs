//! # Mock Clients
//!
//! Test doubles for [`ResourceClient`]. Two styles are available:
//!
//! - [`MockClient`]: queue canned answers up front, hand out the client,
//!   then [`verify`](MockClient::verify) that every answer was consumed. Use
//!   it when the code under test is an actor hook that talks to another
//!   registry (an order reserving product stock).
//! - [`create_mock_client`] with [`expect_get`] / [`expect_action`]: receive
//!   the raw request, assert on its payload, reply by hand. Use it when the
//!   payload itself is what the test is about.
//!
//! ```rust
//! use tracker_actor::mock::MockClient;
//! use tracker_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Depot { id: u32 }
//! #[derive(Debug)] struct DepotCreate;
//! #[derive(Debug, thiserror::Error)] #[error("depot")] struct DepotError;
//!
//! #[async_trait]
//! impl ActorEntity for Depot {
//!     type Id = u32; type Create = DepotCreate; type Update = ();
//!     type Action = (); type ActionResult = (); type Context = (); type Error = DepotError;
//!     fn from_create_params(id: u32, _: DepotCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Depot>::new();
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// A queued answer for the next request.
enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A client backed by a queue of canned answers instead of a real actor.
///
/// Requests must arrive in the order the expectations were queued; a request
/// that does not match the head of the queue panics the mock task, which the
/// caller observes as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// The client to hand to the code under test.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get`. The id is documentation only; answers are positional.
    pub fn expect_get(&mut self, _id: T::Id) -> Answer<T, Option<T>> {
        Answer::new(self.expectations.clone(), Expectation::Get)
    }

    /// Expects a `list`.
    pub fn expect_list(&mut self) -> Answer<T, Vec<T>> {
        Answer::new(self.expectations.clone(), Expectation::List)
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> Answer<T, T::Id> {
        Answer::new(self.expectations.clone(), Expectation::Create)
    }

    /// Expects an action on `_id`.
    pub fn expect_action(&mut self, _id: T::Id) -> Answer<T, T::ActionResult> {
        Answer::new(self.expectations.clone(), Expectation::Action)
    }

    /// Panics if any queued expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder that completes an expectation with its answer.
pub struct Answer<T: ActorEntity, R> {
    expectations: Queue<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> Answer<T, R> {
    fn new(expectations: Queue<T>, wrap: fn(Result<R, FrameworkError>) -> Expectation<T>) -> Self {
        Self { expectations, wrap }
    }

    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}

/// Creates a client together with the receiving end of its channel.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Returns the id and reply channel if the next request is a `get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Returns the id, action and reply channel if the next request is an action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
