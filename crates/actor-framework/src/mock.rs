//! # Mocks for Actor Dependencies
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of scripted expectations instead of a running actor. Use it to test an
//! actor in isolation from the actors it depends on: the order actor, for example, can
//! be exercised against scripted party, material and address replies.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | scripted replies | real store |
//! | **Error injection** | `return_err(..)` | needs a contrived setup |
//! | **Use case** | the code *around* a dependency | the actor itself, or the full system |
//!
//! ## Testing Patterns
//!
//! 1. **Single actor**: spawn one `ResourceActor` and drive it through its client.
//! 2. **Actor with mocked dependencies**: a real actor whose context holds mock clients.
//!    See `tests/order_actor_test.rs` in the application crate.
//! 3. **Full system**: every actor running, as in `tests/integration_test.rs`.
//!
//! ## Simulating a failing dependency
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Material { id: u32, stock: u32 }
//! #[derive(Debug)] struct MaterialCreate;
//! #[derive(Debug)] struct MaterialUpdate;
//! #[derive(Debug)] enum MaterialAction { Reserve(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("material error")] struct MaterialError;
//!
//! #[async_trait]
//! impl ActorEntity for Material {
//!     type Id = u32; type Create = MaterialCreate; type Update = MaterialUpdate;
//!     type Action = MaterialAction; type ActionResult = u32; type Context = ();
//!     type Error = MaterialError;
//!     fn from_create_params(id: u32, _: MaterialCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, stock: 0 })
//!     }
//!     async fn on_update(&mut self, _: MaterialUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: MaterialAction, _: &()) -> Result<u32, Self::Error> {
//!         match a { MaterialAction::Reserve(n) => Ok(self.stock - n) }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Material>::new();
//!     mock.expect_action(7).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     let result = client.perform_action(7, MaterialAction::Reserve(3)).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! [`create_mock_client`] is the lower-level alternative: it returns the raw request
//! receiver so a test can inspect payloads and answer by hand.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};

/// A scripted reply, consumed in FIFO order.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "get",
            Expectation::List { .. } => "list",
            Expectation::Create { .. } => "create",
            Expectation::Update { .. } => "update",
            Expectation::Action { .. } => "action",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<(Option<<T as ActorEntity>::Id>, Expectation<T>)>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<(Option<T::Id>, Expectation<T>)>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock client with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were registered. When an
/// expectation names an id, the request must carry the same id.
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
    /// Creates a new mock client with no expectations. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&queue).pop_front();
                let Some((expected_id, expectation)) = next else {
                    panic!("Unexpected request: no expectations left");
                };
                let kind = expectation.kind();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Expectation::Get { response }) => {
                        check_id::<T>(kind, expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to, .. }, Expectation::List { response }) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Expectation::Create { response },
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Expectation::Update { response },
                    ) => {
                        check_id::<T>(kind, expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Expectation::Action { response },
                    ) => {
                        check_id::<T>(kind, expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (_, expectation) => {
                        panic!(
                            "Unexpected request: expected a {} request",
                            expectation.kind()
                        );
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

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), Some(id), |response| {
            Expectation::Get { response }
        })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), None, |response| {
            Expectation::List { response }
        })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), None, |response| {
            Expectation::Create { response }
        })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), Some(id), |response| {
            Expectation::Update { response }
        })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.expectations.clone(), Some(id), |response| {
            Expectation::Action { response }
        })
    }

    /// Panics if any registered expectation was not consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations);
        if !remaining.is_empty() {
            let kinds: Vec<&str> = remaining.iter().map(|(_, e)| e.kind()).collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                remaining.len(),
                kinds
            );
        }
    }
}

fn check_id<T: ActorEntity>(kind: &str, expected: Option<T::Id>, actual: &T::Id) {
    if let Some(expected) = expected {
        assert_eq!(
            &expected, actual,
            "{kind} request carried an unexpected id"
        );
    }
}

/// Builder that completes one expectation with either a value or an error.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Queue<T>,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> Self {
        Self {
            expectations,
            id,
            wrap,
        }
    }

    pub fn return_ok(self, value: R) {
        lock(&self.expectations).push_back((self.id, (self.wrap)(Ok(value))));
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back((self.id, (self.wrap)(Err(error))));
    }
}

/// Creates a client and the raw receiver its requests land on.
///
/// Pair with [`expect_create`], [`expect_get`], [`expect_list`] and [`expect_action`]
/// to pull the next request off the channel and answer it by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a List request.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    crate::message::Filter<T>,
    oneshot::Sender<Result<Vec<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
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

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Material {
        id: u32,
        name: String,
        stock: u32,
    }

    #[derive(Debug)]
    struct MaterialCreate {
        name: String,
    }

    #[derive(Debug)]
    struct MaterialUpdate;

    #[derive(Debug)]
    enum MaterialAction {
        Reserve(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Material error")]
    struct MaterialError;

    #[async_trait]
    impl ActorEntity for Material {
        type Id = u32;
        type Create = MaterialCreate;
        type Update = MaterialUpdate;
        type Action = MaterialAction;
        type ActionResult = u32;
        type Context = ();
        type Error = MaterialError;

        fn from_create_params(id: u32, params: MaterialCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
                stock: 0,
            })
        }

        async fn on_update(
            &mut self,
            _update: MaterialUpdate,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(
            &mut self,
            _action: MaterialAction,
            _ctx: &Self::Context,
        ) -> Result<u32, Self::Error> {
            Ok(self.stock)
        }
    }

    fn cement(id: u32) -> Material {
        Material {
            id,
            name: "Cement".to_string(),
            stock: 40,
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_answers_create() {
        let (client, mut receiver) = create_mock_client::<Material>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(MaterialCreate {
                    name: "Sand".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Sand");
        responder.send(Ok(1)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(1)));
    }

    #[tokio::test]
    async fn test_raw_receiver_exposes_list_filter() {
        let (client, mut receiver) = create_mock_client::<Material>(10);

        let list_task = tokio::spawn(async move { client.list(|m: &Material| m.stock > 10).await });

        let (filter, responder) = expect_list(&mut receiver).await.expect("Expected List");
        assert!(filter.matches(&cement(1)));
        responder.send(Ok(vec![cement(1)])).unwrap();

        assert_eq!(list_task.await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_raw_receiver_inspects_get_and_action() {
        let (client, mut receiver) = create_mock_client::<Material>(10);

        let task = tokio::spawn(async move {
            let found = client.get(4).await;
            let left = client.perform_action(4, MaterialAction::Reserve(15)).await;
            (found, left)
        });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get");
        assert_eq!(id, 4);
        responder.send(Ok(Some(cement(4)))).unwrap();

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action");
        assert_eq!(id, 4);
        let MaterialAction::Reserve(quantity) = action;
        assert_eq!(quantity, 15);
        responder.send(Ok(40 - quantity)).unwrap();

        let (found, left) = task.await.unwrap();
        assert_eq!(found.unwrap(), Some(cement(4)));
        assert_eq!(left.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_expectations_are_served_in_order() {
        let mut mock = MockClient::<Material>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(cement(1)));
        mock.expect_update(1).return_ok(cement(1));
        mock.expect_action(1).return_ok(37);
        mock.expect_list().return_ok(vec![cement(1), cement(2)]);

        let client = mock.client();

        let id = client
            .create(MaterialCreate {
                name: "Cement".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.get(1).await.unwrap(), Some(cement(1)));
        assert_eq!(client.update(1, MaterialUpdate).await.unwrap().name, "Cement");
        assert_eq!(
            client
                .perform_action(1, MaterialAction::Reserve(3))
                .await
                .unwrap(),
            37
        );
        assert_eq!(client.list(|_| true).await.unwrap().len(), 2);

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_unconsumed_expectations() {
        let mut mock = MockClient::<Material>::new();
        mock.expect_get(5).return_ok(None);
        mock.verify();
    }
}
