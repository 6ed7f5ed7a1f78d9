// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # Netgear Exporter
//!
//! Prometheus exporter for Netgear home routers.
//!
//! This library talks to the router's SOAP management interface through one
//! shared session and exposes connected clients, system resource usage and
//! traffic meter statistics in Prometheus format.
//!
//! ## Main modules
//! - `api`: HTTP API handlers
//! - `collector`: stat collectors and their shared contract
//! - `config`: configuration management
//! - `error`: error types
//! - `filter`: collector selection
//! - `metrics`: metrics parsing, descriptors and registry
//! - `netgear`: SOAP session client and response decoding
//! - `prelude`: commonly used types and traits

mod api;
mod collector;
mod config;
mod error;
mod filter;
mod metrics;
mod netgear;
pub mod prelude;

// Re-export commonly used types
/// Application configuration
pub use config::{BasicAuth, Config, RouterConfig, TlsFiles, WebConfig};

/// Application error and result type
pub use error::{AppError, Result};

/// Collector selection
pub use filter::{CollectorFilter, CollectorKind};

/// HTTP API router and state
pub use api::{AppState, create_router};
pub use api::handlers::{CollectorStatus, HealthResponse, OPENMETRICS_CONTENT_TYPE};

/// Stat collectors
pub use collector::{
    ClientCollector, DeltaState, StatCollector, SYSTEM_INFO_FIELDS, SystemInfoCollector,
    TRAFFIC_FIELDS, TrafficCollector,
};

/// Metrics registry and descriptors
pub use metrics::{
    CollectorHealth, HealthSnapshot, MetricDescriptor, MetricKind, MetricsRegistry, ScrapeHealth,
};

/// Netgear session client and decoded records
pub use netgear::{
    DecodedRecord, DeviceRecord, Operation, ResponseNode, SESSION_ID, SOAP_PATH, SessionClient,
};
