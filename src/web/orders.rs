//! Order handlers.
//!
//! Every mutating handler follows the same sequence: validate, write the order, append
//! one log entry, flash a notice, redirect. The order write and the log append are two
//! separate commits. If the process dies between them the change is kept unaudited.

use crate::model::{ActionType, OrderCreate, OrderId, OrderStatus, UNKNOWN_PERFORMER};
use crate::order_store::OrderError;
use crate::web::flash::Flash;
use crate::web::form::{OrderForm, PerformerForm};
use crate::web::extract::OrderPath;
use crate::web::{views, AppState, WebError};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use table_actor::EntityClient;
use tracing::{info, warn};

pub const ORDER_ADDED: &str = "Order added successfully!";
pub const ORDER_UPDATED: &str = "Order updated successfully!";
pub const ORDER_DELETED: &str = "Order deleted successfully!";
pub const ORDER_COMPLETED: &str = "Order marked as completed!";
pub const ORDER_EXISTS: &str = "This order already exists!";

const LISTING: &str = "/";
const ADD_FORM: &str = "/add_order";

fn redirect_with(state: &AppState, flash: Flash, to: &str) -> Result<Response, WebError> {
    let cookie = state.flash_key.set(&flash)?;
    Ok((cookie, Redirect::to(to)).into_response())
}

fn not_found(id: OrderId) -> WebError {
    WebError::from(OrderError::NotFound(id.to_string()))
}

/// `GET /`, `/index`, `/view_orders`
pub async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let orders = state.orders.list().await?;
    let taken = state.flash_key.take(&headers);
    let page = views::orders_page(&orders, taken.flash());
    Ok((taken, Html(page)).into_response())
}

/// `GET /add_order`
pub async fn add_order_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let taken = state.flash_key.take(&headers);
    let page = views::add_order_page(taken.flash(), state.allow_complete_on_create);
    (taken, Html(page)).into_response()
}

/// `POST /add_order`
pub async fn add_order(
    State(state): State<AppState>,
    Form(form): Form<OrderForm>,
) -> Result<Response, WebError> {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(rejection) => {
            warn!(%rejection, "Add order rejected");
            return redirect_with(&state, Flash::error(rejection.to_string()), ADD_FORM);
        }
    };

    let completed = state.allow_complete_on_create && form.mark_completed();
    let create = OrderCreate::new(fields)
        .completed(completed)
        .reject_duplicates(state.reject_duplicates);

    let order = match state.orders.create_order(create).await {
        Ok(order) => order,
        Err(OrderError::Duplicate(existing)) => {
            warn!(%existing, "Duplicate order rejected");
            return redirect_with(&state, Flash::error(ORDER_EXISTS), ADD_FORM);
        }
        Err(e) => return Err(e.into()),
    };

    let action = match order.status {
        OrderStatus::Completed => ActionType::AddOrderCompleted,
        OrderStatus::Ongoing => ActionType::AddOrder,
    };
    // The sender is never blank here, so "Unknown" is unreachable for adds.
    state
        .logs
        .append(action, form.performer(), &order.fields.sender_name)
        .await?;

    info!(order_id = %order.id, status = %order.status, "Order added");
    redirect_with(&state, Flash::success(ORDER_ADDED), LISTING)
}

/// `GET /edit_order/:id`
pub async fn edit_order_form(
    State(state): State<AppState>,
    OrderPath(id): OrderPath,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let order = state.orders.get(id).await?.ok_or_else(|| not_found(id))?;
    let taken = state.flash_key.take(&headers);
    let page = views::edit_order_page(&order, taken.flash());
    Ok((taken, Html(page)).into_response())
}

/// `POST /update_order/:id`
pub async fn update_order(
    State(state): State<AppState>,
    OrderPath(id): OrderPath,
    Form(form): Form<OrderForm>,
) -> Result<Response, WebError> {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(rejection) => {
            if state.orders.get(id).await?.is_none() {
                return Err(not_found(id));
            }
            warn!(%id, %rejection, "Update order rejected");
            return redirect_with(
                &state,
                Flash::error(rejection.to_string()),
                &format!("/edit_order/{id}"),
            );
        }
    };

    state.orders.update_order(id, fields).await?;
    state
        .logs
        .append(ActionType::UpdateOrder, form.performer(), UNKNOWN_PERFORMER)
        .await?;

    info!(order_id = %id, "Order updated");
    redirect_with(&state, Flash::success(ORDER_UPDATED), LISTING)
}

/// `POST /Mark Order as Completed/:id`
///
/// Marking an already completed order changes nothing but is still recorded. A request
/// without a form body is attributed to nobody.
pub async fn mark_completed(
    State(state): State<AppState>,
    OrderPath(id): OrderPath,
    form: Option<Form<PerformerForm>>,
) -> Result<Response, WebError> {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let changed = state.orders.mark_completed(id).await?;
    state
        .logs
        .append(ActionType::MarkOrderCompleted, form.performer(), UNKNOWN_PERFORMER)
        .await?;

    info!(order_id = %id, changed, "Order marked as completed");
    redirect_with(&state, Flash::success(ORDER_COMPLETED), LISTING)
}

/// `POST /delete_order/:id`
///
/// As with marking completed, a missing form body means no performer was given.
pub async fn delete_order(
    State(state): State<AppState>,
    OrderPath(id): OrderPath,
    form: Option<Form<PerformerForm>>,
) -> Result<Response, WebError> {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    state.orders.delete(id).await?;
    state
        .logs
        .append(ActionType::DeleteOrder, form.performer(), UNKNOWN_PERFORMER)
        .await?;

    info!(order_id = %id, "Order deleted");
    redirect_with(&state, Flash::success(ORDER_DELETED), LISTING)
}
