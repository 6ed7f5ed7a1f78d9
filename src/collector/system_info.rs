// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! System resource collector

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::filter::CollectorKind;
use crate::metrics::parsers::parse_value;
use crate::metrics::{FloatGauge, MetricDescriptor, MetricSet, ScrapeHealth};
use crate::netgear::{DecodedRecord, SessionClient};

use super::StatCollector;

/// Fields read from `GetSystemInfo`, in exposition order
pub const SYSTEM_INFO_FIELDS: [&str; 5] = [
    "CPUUtilization",
    "PhysicalMemory",
    "MemoryUtilization",
    "PhysicalFlash",
    "AvailableFlash",
];

pub(crate) struct SystemInfoMetrics {
    fields: Vec<(&'static str, FloatGauge)>,
    health: ScrapeHealth,
}

impl SystemInfoMetrics {
    pub(crate) fn register(set: &mut MetricSet<'_>) -> Self {
        let fields = SYSTEM_INFO_FIELDS
            .iter()
            .map(|&field| {
                let gauge = set.float_gauge(
                    &format!("system_info_{}", field.to_lowercase()),
                    &format!("Value of the '{field}' system info metric from the router"),
                );
                (field, gauge)
            })
            .collect();

        Self {
            fields,
            health: ScrapeHealth::register(set, "system_info", "system info"),
        }
    }

    fn publish(&self, record: &DecodedRecord) {
        for (field, gauge) in &self.fields {
            let Some(raw) = record.get(*field) else {
                tracing::warn!("System info stat named '{}' missing from results", field);
                continue;
            };
            match parse_value(raw) {
                Some(value) => {
                    gauge.set(value);
                }
                None => tracing::warn!(
                    "System info stat '{}' has unparseable value '{}'",
                    field,
                    raw
                ),
            }
        }
    }
}

/// Publishes CPU, memory and flash usage
pub struct SystemInfoCollector {
    client: Arc<SessionClient>,
    metrics: SystemInfoMetrics,
    descriptors: Vec<MetricDescriptor>,
}

impl SystemInfoCollector {
    pub(crate) fn new(mut set: MetricSet<'_>, client: Arc<SessionClient>) -> Self {
        let metrics = SystemInfoMetrics::register(&mut set);
        Self {
            client,
            metrics,
            descriptors: set.into_descriptors(),
        }
    }
}

#[async_trait]
impl StatCollector for SystemInfoCollector {
    fn kind(&self) -> CollectorKind {
        CollectorKind::SystemInfo
    }

    fn describe(&self) -> &[MetricDescriptor] {
        &self.descriptors
    }

    fn health(&self) -> &ScrapeHealth {
        &self.metrics.health
    }

    async fn poll(&self) -> Result<()> {
        let record = self.client.get_system_info().await?;
        self.metrics.publish(&record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::registry::Registry;

    fn record(pairs: &[(&str, &str)]) -> DecodedRecord {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn value(metrics: &SystemInfoMetrics, field: &str) -> f64 {
        metrics
            .fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, gauge)| gauge.get())
            .unwrap()
    }

    #[test]
    fn test_metric_names_are_lowercased() {
        let mut registry = Registry::default();
        let mut set = MetricSet::new(&mut registry, "netgear");
        SystemInfoMetrics::register(&mut set);
        let names: Vec<_> = set.into_descriptors().into_iter().map(|d| d.name).collect();
        assert!(names.contains(&"netgear_system_info_cpuutilization".to_string()));
        assert!(names.contains(&"netgear_system_info_availableflash".to_string()));
    }

    #[test]
    fn test_publish_keeps_previous_value_for_missing_field() {
        let mut registry = Registry::default();
        let mut set = MetricSet::new(&mut registry, "netgear");
        let metrics = SystemInfoMetrics::register(&mut set);

        metrics.publish(&record(&[
            ("CPUUtilization", "12"),
            ("PhysicalMemory", "512"),
            ("MemoryUtilization", "47"),
            ("PhysicalFlash", "128"),
            ("AvailableFlash", "64"),
        ]));
        assert_eq!(value(&metrics, "CPUUtilization"), 12.0);

        metrics.publish(&record(&[("PhysicalMemory", "1024"), ("MemoryUtilization", "bad")]));
        assert_eq!(value(&metrics, "CPUUtilization"), 12.0);
        assert_eq!(value(&metrics, "PhysicalMemory"), 1024.0);
        assert_eq!(value(&metrics, "MemoryUtilization"), 47.0);
    }
}
