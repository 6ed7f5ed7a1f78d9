// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Per-collector scrape bookkeeping

use std::time::Instant;

use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::gauge::Gauge;

use super::descriptor::{FloatGauge, MetricSet};

/// Point-in-time view of a collector's scrape history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSnapshot {
    pub scrapes: u64,
    pub errors: u64,
    pub last_scrape_failed: bool,
}

/// The five health metrics every collector publishes on every poll
#[derive(Clone)]
pub struct ScrapeHealth {
    scrapes_total: Counter,
    scrape_errors_total: Counter,
    last_scrape_error: Gauge,
    last_scrape_timestamp: Gauge,
    last_scrape_duration_seconds: FloatGauge,
}

impl ScrapeHealth {
    /// `subsystem` prefixes the metric names, `stats` names the data in help text
    pub(crate) fn register(set: &mut MetricSet<'_>, subsystem: &str, stats: &str) -> Self {
        Self {
            scrapes_total: set.counter(
                &format!("{subsystem}_scrapes"),
                &format!("Total number of scrapes for Netgear {stats} stats."),
            ),
            scrape_errors_total: set.counter(
                &format!("{subsystem}_scrape_errors"),
                &format!("Total number of scrapes errors for Netgear {stats} stats."),
            ),
            last_scrape_error: set.gauge(
                &format!("last_{subsystem}_scrape_error"),
                &format!(
                    "Whether the last scrape of Netgear {stats} stats resulted in an error (1 for error, 0 for success)."
                ),
            ),
            last_scrape_timestamp: set.gauge(
                &format!("last_{subsystem}_scrape_timestamp"),
                &format!("Number of seconds since 1970 since last scrape of Netgear {stats} metrics."),
            ),
            last_scrape_duration_seconds: set.float_gauge(
                &format!("last_{subsystem}_scrape_duration_seconds"),
                &format!("Duration of the last scrape of Netgear {stats} stats."),
            ),
        }
    }

    pub fn record(&self, started: Instant, failed: bool) {
        if failed {
            self.scrape_errors_total.inc();
        }
        self.scrapes_total.inc();
        self.last_scrape_error.set(i64::from(failed));

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        #[allow(clippy::cast_possible_wrap)]
        self.last_scrape_timestamp.set(now as i64);

        self.last_scrape_duration_seconds
            .set(started.elapsed().as_secs_f64());
    }

    #[must_use]
    pub fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            scrapes: self.scrapes_total.get(),
            errors: self.scrape_errors_total.get(),
            last_scrape_failed: self.last_scrape_error.get() != 0,
        }
    }
}
