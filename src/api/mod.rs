// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! HTTP API module for Netgear Exporter
//!
//! # Endpoints
//! - `GET /` landing page
//! - `GET /health` per-collector health
//! - `GET <telemetry path>` Prometheus metrics, optionally behind basic auth

mod auth;
pub mod handlers;
mod state;

use axum::{Router, middleware, routing::get};
use std::sync::Arc;

pub use state::AppState;

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let metrics = Router::new()
        .route(
            &state.config.web.telemetry_path,
            get(handlers::metrics_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .merge(metrics)
        .with_state(state)
}
