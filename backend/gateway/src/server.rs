//! Keep-alive HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Router};
use prestigebot_config::KeepAliveConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

use crate::health_api;

/// Application state shared across routes.
#[derive(Clone)]
pub struct KeepAliveState {
    pub body: Arc<str>,
    pub started_at: Instant,
}

impl KeepAliveState {
    pub fn new(body: impl Into<Arc<str>>) -> Self {
        Self {
            body: body.into(),
            started_at: Instant::now(),
        }
    }
}

async fn ping(State(state): State<KeepAliveState>) -> String {
    info!("Ping received!");
    state.body.to_string()
}

pub fn keep_alive_router(state: KeepAliveState) -> Router {
    Router::new()
        .route("/", get(ping))
        .route("/api/health", get(health_api::get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the listener fails.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: KeepAliveState) -> Result<()> {
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding keep-alive responder to {addr}"))?;
    info!("Keep-alive server listening on {}", addr);
    axum::serve(listener, keep_alive_router(state)).await?;
    Ok(())
}

/// Run the responder in the background. Failures are logged and never take
/// the bot down; returns `None` when disabled or the address is unusable.
pub fn spawn_keep_alive(config: &KeepAliveConfig) -> Option<JoinHandle<()>> {
    if !config.enabled {
        info!("Keep-alive responder disabled");
        return None;
    }

    let addr: SocketAddr = match format!("{}:{}", config.bind, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid keep-alive address {}:{}: {}", config.bind, config.port, e);
            return None;
        }
    };

    let state = KeepAliveState::new(config.body.as_str());
    Some(tokio::spawn(async move {
        if let Err(e) = start_server(addr, state).await {
            error!("Keep-alive server stopped: {:#}", e);
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn root_returns_configured_body() {
        let app = keep_alive_router(KeepAliveState::new("I'm alive!"));
        let resp = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"I'm alive!");
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let app = keep_alive_router(KeepAliveState::new("x"));
        let resp = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn disabled_config_spawns_nothing() {
        let config = KeepAliveConfig { enabled: false, ..Default::default() };
        assert!(spawn_keep_alive(&config).is_none());
    }

    #[tokio::test]
    async fn bind_failure_is_contained() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();
        let config = KeepAliveConfig {
            bind: "127.0.0.1".into(),
            port,
            ..Default::default()
        };
        let handle = spawn_keep_alive(&config).unwrap();
        // The task logs the bind error and finishes without panicking.
        handle.await.unwrap();
    }
}
