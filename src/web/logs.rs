use crate::web::{views, AppState, WebError};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};

/// `GET /logs`: every action, newest first.
pub async fn list_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let entries = state.logs.list_recent_first().await?;
    let taken = state.flash_key.take(&headers);
    let page = views::logs_page(&entries, taken.flash());
    Ok((taken, Html(page)).into_response())
}
