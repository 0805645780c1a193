//! # Parcel Tracker
//!
//! A small web application for tracking parcel orders, with an append-only audit log of
//! every action taken against them.
//!
//! ## 🏗️ Architecture
//!
//! Each table is owned by a [`TableActor`](table_actor::TableActor) from the
//! `table-actor` crate. The actor holds the table's SQLite connection on a blocking
//! thread and answers requests one at a time; everything else talks to it through a
//! cloneable client.
//!
//! - **[model]**: plain row and payload types ([`Order`](model::Order),
//!   [`LogEntry`](model::LogEntry), [`ActionType`](model::ActionType)).
//! - **[order_store]** / **[action_log]**: the `TableEntity` implementations and their
//!   error types.
//! - **[clients]**: [`OrderClient`](clients::OrderClient) and
//!   [`LogClient`](clients::LogClient).
//! - **[storage]**: database location, connection settings, schema migration.
//! - **[lifecycle]**: [`TrackerSystem`](lifecycle::TrackerSystem) start and shutdown,
//!   tracing setup.
//! - **[web]**: axum routes, form validation, flash notices, HTML pages.
//!
//! ## Request flow
//!
//! ```text
//! form POST -> validate -> OrderClient (orders actor) -> LogClient (logs actor) -> flash + 303
//! ```
//!
//! The order write and its log entry are separate commits on separate connections, in
//! that order. A crash between the two leaves the order change without an audit record.
//!
//! ## 🧪 Testing
//!
//! Handlers can be driven with [`table_actor::mock::MockClient`] in place of the actors;
//! see `tests/handler_mock_test.rs`. End-to-end tests in `tests/integration_test.rs`
//! run the real system against a temporary database.

pub mod action_log;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_store;
pub mod storage;
pub mod web;

pub use config::AppConfig;
pub use error::TrackerError;
pub use lifecycle::TrackerSystem;
