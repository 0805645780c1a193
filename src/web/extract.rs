//! Request extractors shared by the order routes.

use crate::model::OrderId;
use crate::web::WebError;
use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

/// The `:id` segment of an order route.
///
/// Only whole numbers name an order. Anything else is answered like a missing order, with
/// the HTML 404 page rather than axum's plain-text 400.
#[derive(Debug, Clone, Copy)]
pub struct OrderPath(pub OrderId);

#[async_trait]
impl<S> FromRequestParts<S> for OrderPath
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| WebError::NotFound(e.body_text()))?;

        raw.parse()
            .map(|id| OrderPath(OrderId(id)))
            .map_err(|_| WebError::NotFound(format!("Order {raw} not found")))
    }
}
