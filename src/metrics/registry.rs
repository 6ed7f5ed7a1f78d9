// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prometheus registry driving the enabled collectors

use std::sync::Arc;

use futures_util::future::join_all;
use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;
use tokio::sync::Mutex;

use crate::collector::{StatCollector, build_collectors, describe_kind};
use crate::error::{AppError, Result};
use crate::filter::{CollectorFilter, CollectorKind};
use crate::netgear::SessionClient;

use super::descriptor::{FloatGauge, MetricDescriptor, MetricSet};
use super::health::HealthSnapshot;
use super::labels::BuildLabels;

/// Scrape history of one enabled collector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorHealth {
    pub kind: CollectorKind,
    pub snapshot: HealthSnapshot,
}

/// Registry of all exporter metrics
///
/// Cloning is cheap; every clone shares the same registry and collectors.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Arc<Mutex<Registry>>,
    collectors: Arc<Vec<Arc<dyn StatCollector>>>,
    exporter_descriptors: Arc<Vec<MetricDescriptor>>,
}

fn register_build_info(set: &mut MetricSet<'_>) -> Family<BuildLabels, FloatGauge> {
    set.gauge_family(
        "exporter_build_info",
        "A metric with a constant '1' value labeled by the version of the exporter.",
        &["version"],
    )
}

impl MetricsRegistry {
    /// Registers build info and every collector enabled by `filter`
    #[must_use]
    pub fn new(
        namespace: &str,
        client: Arc<SessionClient>,
        filter: &CollectorFilter,
        calculate_delta: bool,
    ) -> Self {
        let mut registry = Registry::default();

        let mut set = MetricSet::new(&mut registry, namespace);
        let build_info = register_build_info(&mut set);
        let exporter_descriptors = set.into_descriptors();
        build_info
            .get_or_create(&BuildLabels {
                version: env!("CARGO_PKG_VERSION").to_string(),
            })
            .set(1.0);

        let collectors =
            build_collectors(&mut registry, namespace, &client, filter, calculate_delta);
        tracing::info!(
            "Registered {} collector(s): {}",
            collectors.len(),
            collectors
                .iter()
                .map(|c| c.kind().as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self {
            registry: Arc::new(Mutex::new(registry)),
            collectors: Arc::new(collectors),
            exporter_descriptors: Arc::new(exporter_descriptors),
        }
    }

    /// Polls every enabled collector concurrently, then encodes the registry
    ///
    /// # Errors
    ///
    /// Returns `AppError::Metrics` when encoding fails. Collector failures only
    /// show up in their scrape health metrics.
    pub async fn scrape(&self) -> Result<String> {
        join_all(self.collectors.iter().map(|c| c.collect())).await;
        self.encode_metrics().await
    }

    /// Encodes the current values without polling the router
    ///
    /// # Errors
    ///
    /// Returns `AppError::Metrics` when encoding fails.
    pub async fn encode_metrics(&self) -> Result<String> {
        let registry = self.registry.lock().await;
        let mut buffer = String::new();
        encode(&mut buffer, &registry)
            .map_err(|e| AppError::Metrics(format!("Failed to encode metrics: {e}")))?;
        Ok(buffer)
    }

    /// Every metric this registry exposes, without touching the router
    #[must_use]
    pub fn describe(&self) -> Vec<MetricDescriptor> {
        self.exporter_descriptors
            .iter()
            .chain(self.collectors.iter().flat_map(|c| c.describe()))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn health(&self) -> Vec<CollectorHealth> {
        self.collectors
            .iter()
            .map(|c| CollectorHealth {
                kind: c.kind(),
                snapshot: c.health().snapshot(),
            })
            .collect()
    }

    /// Descriptors grouped by collector, for listing without credentials
    #[must_use]
    pub fn describe_for(
        namespace: &str,
        filter: &CollectorFilter,
        calculate_delta: bool,
    ) -> Vec<(CollectorKind, Vec<MetricDescriptor>)> {
        filter
            .enabled_kinds()
            .map(|kind| (kind, describe_kind(kind, namespace, calculate_delta)))
            .collect()
    }
}
