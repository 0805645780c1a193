//! # Web Layer
//!
//! axum router, shared state and handlers. Handlers hold no state of their own: they
//! talk to the table actors through the clients in [`AppState`].
//!
//! | Route | Method | Handler |
//! |---|---|---|
//! | `/`, `/index`, `/view_orders` | GET | [`orders::list_orders`] |
//! | `/logs` | GET | [`logs::list_logs`] |
//! | `/add_order` | GET, POST | [`orders::add_order_form`], [`orders::add_order`] |
//! | `/edit_order/:id` | GET | [`orders::edit_order_form`] |
//! | `/update_order/:id` | POST | [`orders::update_order`] |
//! | `/delete_order/:id` | POST | [`orders::delete_order`] |
//! | `/Mark Order as Completed/:id` | POST | [`orders::mark_completed`] |

pub mod error;
pub mod extract;
pub mod flash;
pub mod form;
pub mod logs;
pub mod orders;
pub mod views;

pub use error::WebError;

use crate::clients::{LogClient, OrderClient};
use crate::config::{AppConfig, ConfigError};
use axum::routing::{get, post};
use axum::Router;
use flash::FlashKey;
use tower_http::trace::TraceLayer;

/// Path prefix of the mark-completed route. axum matches the raw request path, so the
/// spaces are registered in their encoded form.
pub const MARK_COMPLETED_PATH: &str = "/Mark%20Order%20as%20Completed";

/// Shared handler state. Cloned per request; clients are channel handles.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderClient,
    pub logs: LogClient,
    pub flash_key: FlashKey,
    pub reject_duplicates: bool,
    pub allow_complete_on_create: bool,
}

impl AppState {
    pub fn new(
        orders: OrderClient,
        logs: LogClient,
        config: &AppConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            orders,
            logs,
            flash_key: FlashKey::new(config.secret_key.as_bytes())?,
            reject_duplicates: config.reject_duplicates,
            allow_complete_on_create: config.allow_complete_on_create,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(orders::list_orders))
        .route("/index", get(orders::list_orders))
        .route("/view_orders", get(orders::list_orders))
        .route("/logs", get(logs::list_logs))
        .route(
            "/add_order",
            get(orders::add_order_form).post(orders::add_order),
        )
        .route("/edit_order/:id", get(orders::edit_order_form))
        .route("/update_order/:id", post(orders::update_order))
        .route("/delete_order/:id", post(orders::delete_order))
        .route(
            &format!("{}/:id", MARK_COMPLETED_PATH),
            post(orders::mark_completed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
