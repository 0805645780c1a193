//! Table-specific wrappers around [`TableClient`](table_actor::TableClient).

pub mod log_client;
pub mod order_client;

pub use log_client::*;
pub use order_client::*;
