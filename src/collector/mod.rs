// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Stat collectors for Netgear routers
//!
//! Each collector owns its metrics inside the shared registry, polls one SOAP
//! operation when a scrape is requested and always records its scrape health,
//! whether the poll succeeded or not.

mod clients;
mod system_info;
mod traffic;

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use prometheus_client::registry::Registry;

use crate::error::Result;
use crate::filter::{CollectorFilter, CollectorKind};
use crate::metrics::{MetricDescriptor, MetricSet, ScrapeHealth};
use crate::netgear::SessionClient;

pub use clients::ClientCollector;
pub use system_info::{SYSTEM_INFO_FIELDS, SystemInfoCollector};
pub use traffic::{DeltaState, TRAFFIC_FIELDS, TrafficCollector};

/// Uniform collect/describe contract shared by every collector
#[async_trait]
pub trait StatCollector: Send + Sync {
    fn kind(&self) -> CollectorKind;

    /// Metrics this collector publishes; never touches the router
    fn describe(&self) -> &[MetricDescriptor];

    fn health(&self) -> &ScrapeHealth;

    /// Fetches one reading from the router and updates the data metrics
    async fn poll(&self) -> Result<()>;

    /// Polls and records scrape health; failures never propagate
    async fn collect(&self) {
        let started = Instant::now();
        let result = self.poll().await;
        if let Err(e) = &result {
            tracing::error!("Error while collecting {} statistics: {}", self.kind(), e);
        }
        self.health().record(started, result.is_err());
    }
}

/// Registers and builds every collector enabled by the filter
pub(crate) fn build_collectors(
    registry: &mut Registry,
    namespace: &str,
    client: &Arc<SessionClient>,
    filter: &CollectorFilter,
    calculate_delta: bool,
) -> Vec<Arc<dyn StatCollector>> {
    let mut collectors: Vec<Arc<dyn StatCollector>> = Vec::new();
    for kind in filter.enabled_kinds() {
        let set = MetricSet::new(&mut *registry, namespace);
        match kind {
            CollectorKind::Client => {
                collectors.push(Arc::new(ClientCollector::new(set, client.clone())));
            }
            CollectorKind::SystemInfo => {
                collectors.push(Arc::new(SystemInfoCollector::new(set, client.clone())));
            }
            CollectorKind::Traffic => {
                collectors.push(Arc::new(TrafficCollector::new(
                    set,
                    client.clone(),
                    calculate_delta,
                )));
            }
        }
        tracing::debug!("Registered {} collector", kind);
    }
    collectors
}

/// Descriptors a collector of `kind` would publish, without a router session
pub(crate) fn describe_kind(
    kind: CollectorKind,
    namespace: &str,
    calculate_delta: bool,
) -> Vec<MetricDescriptor> {
    let mut registry = Registry::default();
    let mut set = MetricSet::new(&mut registry, namespace);
    match kind {
        CollectorKind::Client => {
            clients::ClientMetrics::register(&mut set);
        }
        CollectorKind::SystemInfo => {
            system_info::SystemInfoMetrics::register(&mut set);
        }
        CollectorKind::Traffic => {
            traffic::TrafficMetrics::register(&mut set, calculate_delta);
        }
    }
    set.into_descriptors()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_kind_is_repeatable() {
        for kind in CollectorKind::ALL {
            let first = describe_kind(kind, "netgear", true);
            let second = describe_kind(kind, "netgear", true);
            assert!(!first.is_empty());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_every_collector_describes_scrape_health() {
        for (kind, sub) in [
            (CollectorKind::Client, "client"),
            (CollectorKind::SystemInfo, "system_info"),
            (CollectorKind::Traffic, "traffic"),
        ] {
            let names: Vec<_> = describe_kind(kind, "netgear", false)
                .into_iter()
                .map(|d| d.name)
                .collect();
            assert!(names.contains(&format!("netgear_{sub}_scrapes_total")));
            assert!(names.contains(&format!("netgear_{sub}_scrape_errors_total")));
            assert!(names.contains(&format!("netgear_last_{sub}_scrape_error")));
            assert!(names.contains(&format!("netgear_last_{sub}_scrape_timestamp")));
            assert!(names.contains(&format!("netgear_last_{sub}_scrape_duration_seconds")));
        }
    }
}
