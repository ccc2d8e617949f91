//! HTTP-facing errors and their status mapping.

use ariadne_kernel::DispatchError;
use ariadne_types::config::AGENT_WIRE_CONTENT_TYPE;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Method {0} not allowed, agent messages must be POSTed")]
    MethodNotAllowed(String),

    #[error("Unsupported content type '{0}', expected '{expected}'", expected = AGENT_WIRE_CONTENT_TYPE)]
    UnsupportedMediaType(String),

    #[error("Empty message body")]
    EmptyBody,

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Invalid listen address '{addr}': {reason}")]
    InvalidListenAddr { addr: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::EmptyBody => StatusCode::BAD_REQUEST,
            Self::Dispatch(e) if e.is_rejected_message() => StatusCode::BAD_REQUEST,
            Self::Dispatch(_) | Self::InvalidListenAddr { .. } | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = serde_json::json!({ "error": self.to_string() });
        if let Self::Dispatch(e) = &self {
            body["stage"] = serde_json::Value::String(e.stage.to_string());
        }

        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %self, "Agent message failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "Agent message rejected");
        }

        let mut response = (status, Json(body)).into_response();
        if matches!(self, Self::MethodNotAllowed(_)) {
            response
                .headers_mut()
                .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
        }
        response
    }
}
