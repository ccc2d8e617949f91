//! Request guard for the agent endpoint.
//!
//! Runs before the kernel is touched: only `POST` requests carrying the agent
//! wire content type get through.

use crate::error::ApiError;
use ariadne_types::config::AGENT_WIRE_CONTENT_TYPE;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Whether a `Content-Type` value names the agent wire media type.
/// Parameters such as `charset` are ignored.
pub fn is_agent_wire(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|media_type| media_type.trim().eq_ignore_ascii_case(AGENT_WIRE_CONTENT_TYPE))
        .unwrap_or(false)
}

/// Reject anything that is not a `POST` of agent wire bytes.
pub async fn require_agent_wire(request: Request<Body>, next: Next) -> Response {
    if request.method() != Method::POST {
        return ApiError::MethodNotAllowed(request.method().to_string()).into_response();
    }

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !is_agent_wire(content_type) {
        return ApiError::UnsupportedMediaType(content_type.to_string()).into_response();
    }

    next.run(request).await
}
