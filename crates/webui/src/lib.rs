// Copyright (C) 2025 Zhuo Zhang and Wuqi Zhang
// SPDX-License-Identifier: AGPL-3.0
//! Web User Interface for tracediff
//!
//! Serves the comparison views as server-rendered HTML. Each request is an
//! independent run-to-completion render over the immutable diff context;
//! no state lives between requests beyond the context itself.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use eyre::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracediff_engine::DiffContext;

pub mod render;

/// Configuration for the Web UI
#[derive(Debug, Clone)]
pub struct WebUiConfig {
    /// Port to serve the web UI on
    pub port: u16,
}

impl Default for WebUiConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Main Web UI server
pub struct WebUi {
    config: WebUiConfig,
    ctx: Arc<DiffContext>,
}

impl WebUi {
    /// Create a new Web UI instance over a loaded diff context
    pub fn new(config: WebUiConfig, ctx: DiffContext) -> Self {
        Self { config, ctx: Arc::new(ctx) }
    }

    /// Build the router for the web application
    fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/opcodes/{tx}/{step}", get(opcodes))
            .route("/transactions/{tx}", get(transactions))
            .route("/state", get(state))
            .route("/health", get(|| async { "OK" }))
            .with_state(self.ctx.clone())
            .layer(CorsLayer::permissive())
    }

    /// Run the Web UI server
    pub async fn run(self) -> Result<()> {
        let app = self.build_router();
        let addr = SocketAddr::from(([127, 0, 0, 1], self.config.port));

        tracing::info!("Starting Web UI server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn index(State(ctx): State<Arc<DiffContext>>) -> Response {
    if ctx.transaction_count() == 1 {
        // a single transaction needs no overview
        return Redirect::to("/opcodes/0/0").into_response();
    }
    Html(render::index_page(&ctx)).into_response()
}

async fn opcodes(
    State(ctx): State<Arc<DiffContext>>,
    Path((tx, step)): Path<(usize, usize)>,
) -> Response {
    match render::opcodes_page(&ctx, tx, step) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!(tx, step, error = %e, "Opcode view failed");
            (StatusCode::NOT_FOUND, Html(render::error_page(&ctx, &e))).into_response()
        }
    }
}

async fn transactions(State(ctx): State<Arc<DiffContext>>, Path(tx): Path<usize>) -> Response {
    match render::transactions_page(&ctx, tx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!(tx, error = %e, "Transaction view failed");
            (StatusCode::NOT_FOUND, Html(render::error_page(&ctx, &e))).into_response()
        }
    }
}

async fn state(State(ctx): State<Arc<DiffContext>>) -> Html<String> {
    Html(render::state_page(&ctx))
}

/// Public API for the Web UI module
pub mod api {
    use super::*;

    /// Start the Web UI with the given configuration and context
    pub async fn start_webui(config: WebUiConfig, ctx: DiffContext) -> Result<()> {
        let webui = WebUi::new(config, ctx);
        webui.run().await
    }
}
