// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry module for Netgear Exporter
//!
//! Contains label types, value parsers, metric descriptors, per-collector
//! scrape health and the Prometheus registry that drives the collectors.

mod descriptor;
mod health;
mod labels;
pub(crate) mod parsers;
mod registry;

pub use descriptor::{FloatGauge, MetricDescriptor, MetricKind};
pub(crate) use descriptor::MetricSet;

/// Scrape bookkeeping shared by all collectors
pub use health::{HealthSnapshot, ScrapeHealth};

/// Labels for clients and build info
pub use labels::{ClientLabels, MacLabels};

/// Prometheus metrics registry
pub use registry::{CollectorHealth, MetricsRegistry};
