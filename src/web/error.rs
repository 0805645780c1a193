//! HTTP-facing errors.

use crate::action_log::LogError;
use crate::order_store::OrderError;
use crate::web::flash::FlashError;
use crate::web::views;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

/// Failures a handler cannot turn into a notice. Validation problems never get here;
/// they are flashed and redirected.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<OrderError> for WebError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => WebError::NotFound(format!("Order {id} not found")),
            other => WebError::Internal(other.to_string()),
        }
    }
}

impl From<LogError> for WebError {
    fn from(err: LogError) -> Self {
        WebError::Internal(err.to_string())
    }
}

impl From<FlashError> for WebError {
    fn from(err: FlashError) -> Self {
        WebError::Internal(err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let page = match &self {
            WebError::NotFound(message) => views::error_page("Not Found", message),
            WebError::Internal(detail) => {
                // Details stay in the server log.
                error!(error = %detail, "Request failed");
                views::error_page("Server Error", "Something went wrong. Please try again.")
            }
        };
        (status, Html(page)).into_response()
    }
}
