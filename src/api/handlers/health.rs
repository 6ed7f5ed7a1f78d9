// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppState;
use crate::metrics::CollectorHealth;

const HEALTHY: &str = "healthy";
const DEGRADED: &str = "degraded";
const UNKNOWN: &str = "unknown";

/// Health of one enabled collector
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectorStatus {
    pub name: String,
    pub status: String,
    pub scrapes: u64,
    pub errors: u64,
}

/// Health check endpoint response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub collectors: Vec<CollectorStatus>,
}

impl From<&CollectorHealth> for CollectorStatus {
    fn from(health: &CollectorHealth) -> Self {
        let status = if health.snapshot.scrapes == 0 {
            UNKNOWN
        } else if health.snapshot.last_scrape_failed {
            DEGRADED
        } else {
            HEALTHY
        };
        Self {
            name: health.kind.to_string(),
            status: status.to_string(),
            scrapes: health.snapshot.scrapes,
            errors: health.snapshot.errors,
        }
    }
}

/// GET /health
///
/// Reports the outcome of each collector's last scrape. Answers 503 when any
/// collector's last scrape failed.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let collectors: Vec<CollectorStatus> =
        state.metrics.health().iter().map(CollectorStatus::from).collect();

    let degraded = collectors.iter().any(|c| c.status == DEGRADED);
    let (code, status) = if degraded {
        (StatusCode::SERVICE_UNAVAILABLE, DEGRADED)
    } else {
        (StatusCode::OK, HEALTHY)
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        collectors,
    };

    (code, Json(response))
}
