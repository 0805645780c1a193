//! Plain row and payload types for the two tables.

pub mod log_entry;
pub mod order;

pub use log_entry::*;
pub use order::*;
