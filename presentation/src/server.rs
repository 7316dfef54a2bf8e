//! HTTP transport: `POST /mcp` and `GET /health`.

use crate::mcp::{McpHandler, decode_credentials};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gdrive_application::Credentials;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Default, Deserialize)]
struct McpQuery {
    config: Option<String>,
}

/// Build the router serving the MCP endpoint
pub fn router(handler: Arc<McpHandler>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/mcp", post(mcp))
        .with_state(handler)
}

async fn health() -> &'static str {
    "ok"
}

async fn mcp(
    State(handler): State<Arc<McpHandler>>,
    Query(query): Query<McpQuery>,
    body: String,
) -> Response {
    let credentials = match query.config.as_deref() {
        Some(encoded) => match decode_credentials(encoded) {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!("Rejected request config: {}", e);
                return bad_request(format!("Invalid config: {}", e));
            }
        },
        None => Credentials::default(),
    };

    match handler.handle_message(&body, &credentials).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// MCP server bound to a listening socket
pub struct McpServer {
    listener: TcpListener,
    handler: Arc<McpHandler>,
}

impl McpServer {
    pub async fn bind(addr: &str, handler: Arc<McpHandler>) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        Ok(Self { listener, handler })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` is cancelled, letting in-flight requests finish
    pub async fn serve(self, shutdown: CancellationToken) -> Result<(), ServerError> {
        info!("MCP server listening on {}", self.local_addr()?);
        axum::serve(self.listener, router(self.handler))
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;
        info!("MCP server stopped");
        Ok(())
    }
}

/// Cancel `token` on Ctrl-C
pub async fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("Failed to listen for Ctrl-C: {}", e);
                return;
            }
            info!("Shutdown requested");
            token.cancel();
        }
        _ = token.cancelled() => {}
    }
}
