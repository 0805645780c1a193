//! Runtime orchestration: starting and stopping the table actors, and tracing setup.

pub mod tracker_system;
pub mod tracing;

pub use tracker_system::*;
pub use self::tracing::*;
