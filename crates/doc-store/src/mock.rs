//! # Mock Collections
//!
//! `MockCollection<T>` hands out a real [`CollectionClient<T>`], but every request is
//! answered from a queue of scripted expectations instead of a running collection.
//! Use it to test code that *talks to* the store (pipelines, schedulers, domain clients)
//! deterministically, including failures that are hard to provoke with a real actor.
//!
//! | Feature | MockCollection | Real CollectionActor |
//! |---------|----------------|----------------------|
//! | **State** | None, scripted answers | Real documents |
//! | **Error Injection** | `return_err` | Only by stopping the actor |
//! | **Use Case** | Logic *around* the client | The collection itself or the full system |
//!
//! ```rust,ignore
//! let mut customers = MockCollection::<Customer>::new();
//! customers.expect_get(CustomerId(1)).return_ok(Some(alice));
//! customers.expect_get(CustomerId(2)).return_err(StoreError::ActorClosed);
//!
//! let client = CustomerClient::new(customers.client());
//! // ... exercise code under test ...
//! customers.verify();
//! ```
//!
//! A request that arrives with no matching expectation is counted, answered by dropping
//! the responder (the caller sees `StoreError::ActorDropped`), and reported by
//! [`MockCollection::verify`].

use crate::{CollectionClient, Document, StoreError, StoreRequest};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, oneshot};

/// A scripted answer, matched in FIFO order against incoming requests.
enum Expectation<T: Document> {
    Insert {
        response: Result<T::Id, StoreError>,
    },
    Get {
        response: Result<Option<T>, StoreError>,
    },
    GetMany {
        response: Result<Vec<T>, StoreError>,
    },
    Find {
        response: Result<Vec<T>, StoreError>,
    },
    Update {
        response: Result<T, StoreError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: Document>(expectations: &Expectations<T>) -> std::sync::MutexGuard<'_, VecDeque<Expectation<T>>> {
    expectations.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock collection with expectation tracking.
pub struct MockCollection<T: Document> {
    client: CollectionClient<T>,
    expectations: Expectations<T>,
    requests: Arc<AtomicUsize>,
    unexpected: Arc<AtomicUsize>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Document> MockCollection<T> {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let requests = Arc::new(AtomicUsize::new(0));
        let unexpected = Arc::new(AtomicUsize::new(0));

        let task_expectations = expectations.clone();
        let task_requests = requests.clone();
        let task_unexpected = unexpected.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                task_requests.fetch_add(1, Ordering::SeqCst);
                let expectation = lock(&task_expectations).pop_front();

                let answered = match (request, expectation) {
                    (StoreRequest::Insert { respond_to, .. }, Some(Expectation::Insert { response })) => {
                        respond_to.send(response).is_ok()
                    }
                    (StoreRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        respond_to.send(response).is_ok()
                    }
                    (StoreRequest::GetMany { respond_to, .. }, Some(Expectation::GetMany { response })) => {
                        respond_to.send(response).is_ok()
                    }
                    (StoreRequest::Find { respond_to, .. }, Some(Expectation::Find { response })) => {
                        respond_to.send(response).is_ok()
                    }
                    (StoreRequest::Update { respond_to, .. }, Some(Expectation::Update { response })) => {
                        respond_to.send(response).is_ok()
                    }
                    _ => false,
                };
                if !answered {
                    task_unexpected.fetch_add(1, Ordering::SeqCst);
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            requests,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    /// Number of requests received so far, expected or not.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Insert { response })
    }

    pub fn expect_get(&mut self, _id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Get { response })
    }

    pub fn expect_get_many(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::GetMany { response })
    }

    pub fn expect_find(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Find { response })
    }

    pub fn expect_update(&mut self, _id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Update { response })
    }

    /// Panics unless every expectation was consumed and no unexpected request arrived.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
        let unexpected = self.unexpected.load(Ordering::SeqCst);
        if unexpected != 0 {
            panic!("{} unexpected request(s) reached the mock", unexpected);
        }
    }
}

impl<T: Document> Default for MockCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned by the `expect_*` methods; finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<T: Document, R> {
    expectations: Expectations<T>,
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
}

impl<T: Document, R> ExpectationBuilder<T, R> {
    fn new(expectations: Expectations<T>, wrap: fn(Result<R, StoreError>) -> Expectation<T>) -> Self {
        Self { expectations, wrap }
    }

    /// Answers the matching request successfully.
    pub fn return_ok(self, value: R) {
        lock(&self.expectations).push_back((self.wrap)(Ok(value)));
    }

    /// Answers the matching request with an error.
    pub fn return_err(self, error: StoreError) {
        lock(&self.expectations).push_back((self.wrap)(Err(error)));
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client and the raw receiver behind it, for tests that want to inspect
/// each request and answer it by hand.
pub fn create_mock_collection<T: Document>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Receives the next request and returns it if it is an Insert.
pub async fn expect_insert<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Receives the next request and returns it if it is a Find.
pub async fn expect_find<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Filter, oneshot::Sender<Result<Vec<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Find { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("note error")]
    struct NoteError;

    impl Document for Note {
        type Id = u32;
        type Create = String;
        type Update = String;
        type Filter = String;
        type Error = NoteError;

        fn from_create(id: u32, text: String) -> Result<Self, NoteError> {
            Ok(Self { id, text })
        }

        fn apply_update(&mut self, text: String) -> Result<(), NoteError> {
            self.text = text;
            Ok(())
        }

        fn matches(&self, filter: &String) -> bool {
            self.text.contains(filter.as_str())
        }
    }

    #[tokio::test]
    async fn test_channel_level_insert() {
        let (client, mut receiver) = create_mock_collection::<Note>(10);

        let insert_task = tokio::spawn(async move { client.insert("hello".to_string()).await });

        let (payload, responder) = expect_insert(&mut receiver).await.expect("Expected Insert request");
        assert_eq!(payload, "hello");
        responder.send(Ok(7)).unwrap();

        assert_eq!(insert_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_scripted_answers_in_order() {
        let mut mock = MockCollection::<Note>::new();
        mock.expect_get(1).return_ok(Some(Note { id: 1, text: "a".into() }));
        mock.expect_find().return_err(StoreError::ActorClosed);

        let client = mock.client();
        let note = client.get(1).await.unwrap();
        assert_eq!(note.unwrap().text, "a");

        let result = client.find("a".to_string()).await;
        assert!(matches!(result, Err(StoreError::ActorClosed)));

        assert_eq!(mock.requests(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_surfaces_as_dropped() {
        let mock = MockCollection::<Note>::new();
        let result = mock.client().get(3).await;
        assert!(matches!(result, Err(StoreError::ActorDropped)));
        assert_eq!(mock.requests(), 1);
    }
}
