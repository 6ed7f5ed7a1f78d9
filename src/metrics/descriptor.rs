// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metric descriptors and namespaced registration

use std::fmt;
use std::sync::atomic::AtomicU64;

use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;

/// Gauge holding floating point samples
pub type FloatGauge = Gauge<f64, AtomicU64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counter => f.write_str("counter"),
            Self::Gauge => f.write_str("gauge"),
        }
    }
}

/// Static description of one exposed metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    /// Name as it appears in the exposition, `_total` included for counters
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub labels: Vec<&'static str>,
}

/// Registers metrics under a namespace and records their descriptors
pub(crate) struct MetricSet<'a> {
    registry: &'a mut Registry,
    namespace: &'a str,
    descriptors: Vec<MetricDescriptor>,
}

impl<'a> MetricSet<'a> {
    pub(crate) fn new(registry: &'a mut Registry, namespace: &'a str) -> Self {
        Self {
            registry,
            namespace,
            descriptors: Vec::new(),
        }
    }

    fn full_name(&self, name: &str) -> String {
        format!("{}_{}", self.namespace, name)
    }

    fn describe(&mut self, name: String, help: &str, kind: MetricKind, labels: &[&'static str]) {
        self.descriptors.push(MetricDescriptor {
            name,
            help: help.to_string(),
            kind,
            labels: labels.to_vec(),
        });
    }

    pub(crate) fn counter(&mut self, name: &str, help: &str) -> Counter {
        let metric = Counter::default();
        let full = self.full_name(name);
        self.registry.register(full.clone(), help, metric.clone());
        self.describe(format!("{full}_total"), help, MetricKind::Counter, &[]);
        metric
    }

    pub(crate) fn gauge(&mut self, name: &str, help: &str) -> Gauge {
        let metric = Gauge::default();
        let full = self.full_name(name);
        self.registry.register(full.clone(), help, metric.clone());
        self.describe(full, help, MetricKind::Gauge, &[]);
        metric
    }

    pub(crate) fn float_gauge(&mut self, name: &str, help: &str) -> FloatGauge {
        let metric = FloatGauge::default();
        let full = self.full_name(name);
        self.registry.register(full.clone(), help, metric.clone());
        self.describe(full, help, MetricKind::Gauge, &[]);
        metric
    }

    pub(crate) fn gauge_family<L>(
        &mut self,
        name: &str,
        help: &str,
        labels: &[&'static str],
    ) -> Family<L, FloatGauge>
    where
        L: EncodeLabelSet + Clone + fmt::Debug + std::hash::Hash + Eq + Send + Sync + 'static,
    {
        let metric = Family::<L, FloatGauge>::default();
        let full = self.full_name(name);
        self.registry.register(full.clone(), help, metric.clone());
        self.describe(full, help, MetricKind::Gauge, labels);
        metric
    }

    pub(crate) fn into_descriptors(self) -> Vec<MetricDescriptor> {
        self.descriptors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::labels::MacLabels;
    use prometheus_client::encoding::text::encode;

    #[test]
    fn test_descriptors_follow_registration() {
        let mut registry = Registry::default();
        let mut set = MetricSet::new(&mut registry, "netgear");
        let counter = set.counter("client_scrapes", "Total scrapes");
        let gauge = set.float_gauge("traffic_download", "Downloaded since previous check");
        let family = set.gauge_family::<MacLabels>("client_wireless_speed", "Speed", &["mac"]);
        let descriptors = set.into_descriptors();

        let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "netgear_client_scrapes_total",
                "netgear_traffic_download",
                "netgear_client_wireless_speed"
            ]
        );
        assert_eq!(descriptors[0].kind, MetricKind::Counter);
        assert_eq!(descriptors[2].labels, vec!["mac"]);

        counter.inc();
        gauge.set(1.5);
        family
            .get_or_create(&MacLabels {
                mac: "aa:bb".to_string(),
            })
            .set(65.0);

        let mut out = String::new();
        encode(&mut out, &registry).unwrap();
        for name in names {
            assert!(out.contains(name), "missing {name} in:\n{out}");
        }
    }
}
