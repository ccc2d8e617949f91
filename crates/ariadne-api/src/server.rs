//! Agent HTTP endpoint — accepts wire messages and relays replies.

use crate::error::ApiError;
use crate::middleware::require_agent_wire;
use ariadne_kernel::AgentKernel;
use ariadne_types::config::AGENT_WIRE_CONTENT_TYPE;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the router: `/` takes agent messages, `/health` reports status.
pub fn router(kernel: Arc<AgentKernel>) -> Router {
    let body_limit = kernel.config().max_body_bytes;
    Router::new()
        .route("/", any(receive_message))
        .route_layer(axum::middleware::from_fn(require_agent_wire))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(kernel)
}

async fn receive_message(
    State(kernel): State<Arc<AgentKernel>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    match kernel.process(&body).await? {
        Some(reply) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, AGENT_WIRE_CONTENT_TYPE)],
            reply,
        )
            .into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}

async fn health(State(kernel): State<Arc<AgentKernel>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "agent": kernel.config().agent_name,
        "message_types": kernel.dispatcher().handlers().message_types(),
    }))
}

/// Serve the agent endpoint on the configured address until `shutdown` resolves.
pub async fn serve<F>(kernel: Arc<AgentKernel>, shutdown: F) -> Result<(), ApiError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listen_addr = kernel.config().listen_addr.clone();
    let addr: SocketAddr = listen_addr
        .parse()
        .map_err(|e: std::net::AddrParseError| ApiError::InvalidListenAddr {
            addr: listen_addr.clone(),
            reason: e.to_string(),
        })?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Agent endpoint listening");

    axum::serve(listener, router(kernel))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Agent endpoint stopped");
    Ok(())
}
