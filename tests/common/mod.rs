#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use parcel_tracker::web::flash::{Flash, FlashKey};
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

pub fn flash_key() -> FlashKey {
    FlashKey::new(SECRET.as_bytes()).unwrap()
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    send(router, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_with_cookie(router: &Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

pub async fn post_form(router: &Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(router, request).await
}

/// A POST with no body and no content type, as sent by a bare button or a script.
pub async fn post_empty(router: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Asserts a 303 redirect and returns its target.
pub fn redirect_target(response: &Response<Body>) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response.headers()[LOCATION].to_str().unwrap()
}

/// The `flash=<value>` pair set by `response`, ready to send back as a cookie.
pub fn flash_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with("flash=") && !v.contains("Max-Age=0"))
        .find_map(|v| v.split(';').next().map(str::to_string))
}

/// Decodes the notice set by `response`.
pub fn flash_of(response: &Response<Body>) -> Option<Flash> {
    let pair = flash_cookie(response)?;
    flash_key().decode(pair.strip_prefix("flash=")?)
}

pub fn clears_flash(response: &Response<Body>) -> bool {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("flash=;") && v.contains("Max-Age=0"))
}

pub const ORDER_FIELDS: [&str; 5] = [
    "items",
    "delivery_date",
    "sender_name",
    "recipient_name",
    "recipient_address",
];

/// `ALICE_ORDER` with `field` dropped (`blank == false`) or sent empty (`blank == true`).
pub fn alice_order_without(field: &str, blank: bool) -> String {
    ALICE_ORDER
        .split('&')
        .filter_map(|pair| match pair.split_once('=') {
            Some((name, _)) if name == field => blank.then(|| format!("{name}=")),
            _ => Some(pair.to_string()),
        })
        .collect::<Vec<_>>()
        .join("&")
}

pub const ALICE_ORDER: &str = "items=3&delivery_date=2024-05-01&sender_name=Alice&recipient_name=Bob&recipient_address=1+Main+St";
