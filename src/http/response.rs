//! Canned response construction.
//!
//! # Responsibilities
//! - Copy configured headers (every value, in order) onto the response
//! - Apply the configured status and body
//!
//! # Design Decisions
//! - An empty body sends no payload
//! - Text bodies get `text/plain; charset=utf-8` unless a `Content-Type` was configured

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::response::Response;

use crate::config::ServerConfig;

const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";

/// Build the response every request receives.
pub fn canned_response(config: &ServerConfig) -> Response {
    let body = if config.body.is_empty() {
        Body::empty()
    } else {
        Body::from(config.body.clone())
    };

    let mut response = Response::new(body);
    *response.status_mut() = config.status;

    let headers = response.headers_mut();
    for (name, value) in &config.headers {
        headers.append(name, value.clone());
    }
    if !config.body.is_empty() && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF_8));
    }

    response
}
