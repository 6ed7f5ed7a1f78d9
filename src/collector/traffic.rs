// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Traffic meter collector
//!
//! Publishes the router's cumulative traffic counters. With delta mode on it
//! also turns today's download and upload totals into per-interval values.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::filter::CollectorKind;
use crate::metrics::parsers::{is_time_field, parse_connection_time, parse_value};
use crate::metrics::{FloatGauge, MetricDescriptor, MetricSet, ScrapeHealth};
use crate::netgear::{DecodedRecord, SessionClient};

use super::StatCollector;

/// Fields read from `GetTrafficMeterStatistics`, in exposition order
pub const TRAFFIC_FIELDS: [&str; 21] = [
    "TodayConnectionTime",
    "TodayDownload",
    "TodayUpload",
    "YesterdayConnectionTime",
    "YesterdayDownload",
    "YesterdayUpload",
    "WeekConnectionTime",
    "WeekDownload",
    "WeekDownloadAverage",
    "WeekUpload",
    "WeekUploadAverage",
    "MonthConnectionTime",
    "MonthDownload",
    "MonthDownloadAverage",
    "MonthUpload",
    "MonthUploadAverage",
    "LastMonthConnectionTime",
    "LastMonthDownload",
    "LastMonthDownloadAverage",
    "LastMonthUpload",
    "LastMonthUploadAverage",
];

const DELTA_IN_FIELD: &str = "TodayDownload";
const DELTA_OUT_FIELD: &str = "TodayUpload";

/// Previous cumulative readings; negative until the first reading arrives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaState {
    previous_in: f64,
    previous_out: f64,
}

impl Default for DeltaState {
    fn default() -> Self {
        Self {
            previous_in: -1.0,
            previous_out: -1.0,
        }
    }
}

impl DeltaState {
    /// Returns the `(download, upload)` deltas since the previous reading.
    ///
    /// The first reading seeds the state and yields zero. A counter that went
    /// backwards (router reset or day rollover) yields zero as well. The stored
    /// readings are always replaced by the current ones.
    pub fn advance(&mut self, current_in: f64, current_out: f64) -> (f64, f64) {
        if self.previous_in < 0.0 {
            self.previous_in = current_in;
        }
        if self.previous_out < 0.0 {
            self.previous_out = current_out;
        }

        let delta_in = (current_in - self.previous_in).max(0.0);
        let delta_out = (current_out - self.previous_out).max(0.0);

        tracing::debug!(
            "In - previous: {}, current: {}, delta: {}",
            self.previous_in,
            current_in,
            delta_in
        );
        tracing::debug!(
            "Out - previous: {}, current: {}, delta: {}",
            self.previous_out,
            current_out,
            delta_out
        );

        self.previous_in = current_in;
        self.previous_out = current_out;
        (delta_in, delta_out)
    }
}

struct DeltaMetrics {
    download: FloatGauge,
    upload: FloatGauge,
}

pub(crate) struct TrafficMetrics {
    fields: Vec<(&'static str, FloatGauge)>,
    delta: Option<DeltaMetrics>,
    health: ScrapeHealth,
}

impl TrafficMetrics {
    pub(crate) fn register(set: &mut MetricSet<'_>, calculate_delta: bool) -> Self {
        let fields = TRAFFIC_FIELDS
            .iter()
            .map(|&field| {
                let gauge = set.float_gauge(
                    &format!("traffic_{}", field.to_lowercase()),
                    &format!("Value of the '{field}' traffic metric from the router"),
                );
                (field, gauge)
            })
            .collect();

        let delta = calculate_delta.then(|| DeltaMetrics {
            download: set.float_gauge("traffic_download", "Value downloaded since previous check"),
            upload: set.float_gauge("traffic_upload", "Value uploaded since previous check"),
        });

        Self {
            fields,
            delta,
            health: ScrapeHealth::register(set, "traffic", "traffic"),
        }
    }

    fn publish(&self, record: &DecodedRecord) {
        for (field, gauge) in &self.fields {
            let Some(raw) = record.get(*field) else {
                tracing::warn!("Traffic stat named '{}' missing from results", field);
                continue;
            };
            let value = if is_time_field(field) {
                parse_connection_time(raw)
            } else {
                parse_value(raw)
            };
            match value {
                Some(value) => {
                    gauge.set(value);
                }
                None => tracing::warn!(
                    "Traffic stat '{}' has unparseable value '{}'",
                    field,
                    raw
                ),
            }
        }
    }

    fn publish_delta(&self, record: &DecodedRecord, state: &mut DeltaState) {
        let Some(delta) = &self.delta else {
            return;
        };
        let current_in = record.get(DELTA_IN_FIELD).and_then(|v| parse_value(v));
        let current_out = record.get(DELTA_OUT_FIELD).and_then(|v| parse_value(v));
        let (Some(current_in), Some(current_out)) = (current_in, current_out) else {
            tracing::warn!(
                "Traffic delta skipped, '{}' or '{}' missing from results",
                DELTA_IN_FIELD,
                DELTA_OUT_FIELD
            );
            return;
        };

        let (delta_in, delta_out) = state.advance(current_in, current_out);
        delta.download.set(delta_in);
        delta.upload.set(delta_out);
    }
}

/// Publishes traffic meter statistics and, optionally, per-interval deltas
pub struct TrafficCollector {
    client: Arc<SessionClient>,
    metrics: TrafficMetrics,
    state: Mutex<DeltaState>,
    descriptors: Vec<MetricDescriptor>,
}

impl TrafficCollector {
    pub(crate) fn new(
        mut set: MetricSet<'_>,
        client: Arc<SessionClient>,
        calculate_delta: bool,
    ) -> Self {
        let metrics = TrafficMetrics::register(&mut set, calculate_delta);
        Self {
            client,
            metrics,
            state: Mutex::new(DeltaState::default()),
            descriptors: set.into_descriptors(),
        }
    }
}

#[async_trait]
impl StatCollector for TrafficCollector {
    fn kind(&self) -> CollectorKind {
        CollectorKind::Traffic
    }

    fn describe(&self) -> &[MetricDescriptor] {
        &self.descriptors
    }

    fn health(&self) -> &ScrapeHealth {
        &self.metrics.health
    }

    async fn poll(&self) -> Result<()> {
        // Held across the fetch so readings reach the delta in fetch order
        let mut state = self.state.lock().await;
        let record = self.client.get_traffic_meter().await?;
        self.metrics.publish(&record);
        self.metrics.publish_delta(&record, &mut state);
        Ok(())
    }
}
