//! # Mock Client
//!
//! `MockClient<T>` hands out a real [`TableClient<T>`] whose requests are answered from
//! a queue of scripted expectations instead of a database. Code that takes a client
//! (request handlers, domain clients) can be tested without opening SQLite or spawning
//! an actor thread, and failures that are hard to provoke on a real table
//! (a closed actor, a storage error) are one line to script.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **Storage** | none | SQLite file or in-memory |
//! | **State** | scripted replies | real rows |
//! | **Error injection** | `return_err` | requires a broken database |
//!
//! ```rust,ignore
//! let mut orders = MockClient::<Order>::new();
//! orders.expect_get(OrderId(7)).return_ok(None);
//!
//! let client = OrderClient::new(orders.client());
//! assert!(client.get(OrderId(7)).await?.is_none());
//!
//! orders.verify();
//! ```
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation (wrong operation, wrong id, or params refused by [`ExpectCreate::with`])
//! panics the mock task, which surfaces in the test as [`TableError::ActorDropped`] and
//! as a failed [`MockClient::verify`].

use crate::client::TableClient;
use crate::entity::TableEntity;
use crate::error::TableError;
use crate::message::TableRequest;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Predicate over the payload of an expected `create`.
type CreateMatcher<T> = Box<dyn Fn(&<T as TableEntity>::Create) -> bool + Send>;

/// An expected request and the reply to send back.
enum Expectation<T: TableEntity> {
    Create {
        matcher: Option<CreateMatcher<T>>,
        response: Result<T, TableError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, TableError>,
    },
    List {
        response: Result<Vec<T>, TableError>,
    },
    Update {
        id: T::Id,
        response: Result<T, TableError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), TableError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, TableError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn check_id<I: PartialEq + std::fmt::Debug>(expected: &I, actual: &I) {
    assert_eq!(expected, actual, "Mock received a request for an unexpected id");
}

/// A mock table with expectation tracking.
pub struct MockClient<T: TableEntity> {
    client: TableClient<T>,
    expectations: Queue<T>,
    handle: tokio::task::JoinHandle<()>,
}

impl<T: TableEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableEntity> MockClient<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();

                match (request, next) {
                    (
                        TableRequest::Create { params, respond_to },
                        Some(Expectation::Create { matcher, response }),
                    ) => {
                        if let Some(matches) = matcher {
                            assert!(
                                matches(&params),
                                "Mock received a create request with unexpected params: {params:?}"
                            );
                        }
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id(&expected, &id);
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id(&expected, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id(&expected, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id(&expected, &id);
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {}", kind(&request));
                    }
                }
            }
        });

        Self {
            client: TableClient::new(sender),
            expectations,
            handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> TableClient<T> {
        self.client.clone()
    }

    fn builder<R>(&self, wrap: fn(Result<R, TableError>) -> Expectation<T>) -> Expect<T, R>
    where
        R: 'static,
    {
        Expect {
            expectations: self.expectations.clone(),
            wrap: Box::new(wrap),
            _reply: PhantomData,
        }
    }

    fn builder_for<R>(
        &self,
        id: T::Id,
        wrap: fn(T::Id, Result<R, TableError>) -> Expectation<T>,
    ) -> Expect<T, R>
    where
        R: 'static,
    {
        Expect {
            expectations: self.expectations.clone(),
            wrap: Box::new(move |response| wrap(id, response)),
            _reply: PhantomData,
        }
    }

    /// Expects a `create` request. Narrow it to particular params with
    /// [`ExpectCreate::with`].
    pub fn expect_create(&mut self) -> ExpectCreate<T> {
        ExpectCreate {
            expectations: self.expectations.clone(),
            matcher: None,
        }
    }

    /// Expects a `get` request for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> Expect<T, Option<T>> {
        self.builder_for(id, |id, response| Expectation::Get { id, response })
    }

    /// Expects a `list` request.
    pub fn expect_list(&mut self) -> Expect<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects an `update` request for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> Expect<T, T> {
        self.builder_for(id, |id, response| Expectation::Update { id, response })
    }

    /// Expects a `delete` request for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> Expect<T, ()> {
        self.builder_for(id, |id, response| Expectation::Delete { id, response })
    }

    /// Expects an `action` request for `id`.
    pub fn expect_action(&mut self, id: T::Id) -> Expect<T, T::ActionResult> {
        self.builder_for(id, |id, response| Expectation::Action { id, response })
    }

    /// Verifies that every expectation was consumed and no request was rejected.
    pub fn verify(&self) {
        assert!(
            !self.handle.is_finished(),
            "Mock task stopped: a request did not match its expectation"
        );
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

fn kind<T: TableEntity>(request: &TableRequest<T>) -> &'static str {
    match request {
        TableRequest::Create { .. } => "create",
        TableRequest::Get { .. } => "get",
        TableRequest::List { .. } => "list",
        TableRequest::Update { .. } => "update",
        TableRequest::Delete { .. } => "delete",
        TableRequest::Action { .. } => "action",
    }
}

/// Builder that records the reply for one expected request.
pub struct Expect<T: TableEntity, R> {
    expectations: Queue<T>,
    wrap: Box<dyn Fn(Result<R, TableError>) -> Expectation<T> + Send>,
    _reply: PhantomData<fn() -> R>,
}

impl<T: TableEntity, R> Expect<T, R> {
    /// Replies with a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.wrap)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Replies with an error.
    pub fn return_err(self, error: TableError) {
        let expectation = (self.wrap)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Builder for an expected `create`, optionally checking its params.
pub struct ExpectCreate<T: TableEntity> {
    expectations: Queue<T>,
    matcher: Option<CreateMatcher<T>>,
}

impl<T: TableEntity> ExpectCreate<T> {
    /// Only accepts a `create` whose params satisfy `matcher`. A mismatch fails the
    /// request like any other unexpected one.
    pub fn with(mut self, matcher: impl Fn(&T::Create) -> bool + Send + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Replies with the created row.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Replies with an error.
    pub fn return_err(self, error: TableError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, TableError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create {
                matcher: self.matcher,
                response,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{Connection, Row};
    use std::convert::Infallible;

    #[derive(Clone, Debug, PartialEq)]
    struct Tag {
        id: i64,
        label: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error(transparent)]
    struct TagError(#[from] rusqlite::Error);

    impl TableEntity for Tag {
        type Id = i64;
        type Create = String;
        type Update = Infallible;
        type Action = Infallible;
        type ActionResult = ();
        type Error = TagError;

        const TABLE: &'static str = "tags";
        const COLUMNS: &'static str = "id, label";

        fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
            Ok(Self {
                id: row.get(0)?,
                label: row.get(1)?,
            })
        }

        fn insert(conn: &Connection, label: String) -> Result<Self, TagError> {
            conn.execute("INSERT INTO tags (label) VALUES (?1)", [&label])?;
            Ok(Self {
                id: conn.last_insert_rowid(),
                label,
            })
        }

        fn on_update(_: &Connection, _: i64, update: Infallible) -> Result<Option<Self>, TagError> {
            match update {}
        }

        fn handle_action(_: &Connection, _: i64, action: Infallible) -> Result<Option<()>, TagError> {
            match action {}
        }
    }

    fn tag(id: i64, label: &str) -> Tag {
        Tag {
            id,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_create().return_ok(tag(1, "fragile"));
        mock.expect_get(1).return_ok(Some(tag(1, "fragile")));
        mock.expect_list()
            .return_ok(vec![tag(1, "fragile"), tag(2, "express")]);

        let client = mock.client();

        let created = client.create("fragile".to_string()).await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched, Some(tag(1, "fragile")));

        let all = client.list().await.unwrap();
        assert_eq!(all.len(), 2);

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_injects_errors() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_delete(3).return_err(TableError::AppendOnly("tags"));
        mock.expect_get(4).return_err(TableError::ActorClosed);

        let client = mock.client();
        assert!(matches!(
            client.delete(3).await,
            Err(TableError::AppendOnly("tags"))
        ));
        assert!(matches!(client.get(4).await, Err(TableError::ActorClosed)));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_rejects_wrong_id() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_get(1).return_ok(None);

        let client = mock.client();
        let result = client.get(2).await;
        assert!(matches!(result, Err(TableError::ActorDropped)));
    }

    #[tokio::test]
    async fn test_mock_client_checks_create_params() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_create()
            .with(|label: &String| label == "fragile")
            .return_ok(tag(1, "fragile"));
        mock.expect_create()
            .with(|label: &String| label == "fragile")
            .return_ok(tag(2, "fragile"));

        let client = mock.client();
        assert!(client.create("fragile".to_string()).await.is_ok());

        let result = client.create("express".to_string()).await;
        assert!(matches!(result, Err(TableError::ActorDropped)));
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_unmet_expectations() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_list().return_ok(Vec::new());
        mock.verify();
    }
}
