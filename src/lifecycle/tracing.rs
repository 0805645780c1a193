//! # Observability
//!
//! [`setup_tracing`] installs the process-wide subscriber. Output is compact and omits
//! module paths; the structured fields (`table`, `id`, `rows`, `error`) carry the context.
//!
//! Levels:
//! - `info`: actor start and stop, every successful write, each HTTP request.
//! - `warn`: missing rows, refused deletes, failed writes, rejected form submissions.
//! - `debug`: full request payloads, once at the client boundary.
//!
//! ```bash
//! RUST_LOG=debug parcel_tracker
//! RUST_LOG=table_actor=debug,tower_http=warn parcel_tracker
//! ```
//!
//! A typical add-order request at `info`:
//!
//! ```text
//! INFO Created table="orders" id=1
//! INFO Created table="logs" id=1
//! INFO Order added order_id=1
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Falls back to `info` when `RUST_LOG` is unset or invalid.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
