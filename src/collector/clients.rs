// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Attached-device collector

use std::sync::Arc;

use async_trait::async_trait;
use prometheus_client::metrics::family::Family;

use crate::error::Result;
use crate::filter::CollectorKind;
use crate::metrics::parsers::parse_value;
use crate::metrics::{
    ClientLabels, FloatGauge, MacLabels, MetricDescriptor, MetricSet, ScrapeHealth,
};
use crate::netgear::{DeviceRecord, SessionClient};

use super::StatCollector;

pub(crate) struct ClientMetrics {
    info: Family<ClientLabels, FloatGauge>,
    wireless_speed: Family<MacLabels, FloatGauge>,
    wireless_strength: Family<MacLabels, FloatGauge>,
    health: ScrapeHealth,
}

impl ClientMetrics {
    pub(crate) fn register(set: &mut MetricSet<'_>) -> Self {
        Self {
            info: set.gauge_family(
                "client_info",
                "Client information with ip, name, MAC address and connection type labels",
                &["ip", "name", "mac", "connection_type"],
            ),
            wireless_speed: set.gauge_family(
                "client_wireless_speed",
                "Wireless speed of clients connected to the network",
                &["mac"],
            ),
            wireless_strength: set.gauge_family(
                "client_wireless_strength",
                "Wireless strength of clients connected to the network",
                &["mac"],
            ),
            health: ScrapeHealth::register(set, "client", "client"),
        }
    }

    fn publish(&self, devices: &[DeviceRecord]) {
        for device in devices {
            self.info
                .get_or_create(&ClientLabels {
                    ip: device.ip_address.clone(),
                    name: device.name.clone(),
                    mac: device.mac_address.clone(),
                    connection_type: device.connection_type.clone(),
                })
                .set(1.0);

            if device.is_wired() {
                continue;
            }

            let labels = MacLabels {
                mac: device.mac_address.clone(),
            };
            match parse_value(&device.wireless_link_speed) {
                Some(speed) => {
                    self.wireless_speed.get_or_create(&labels).set(speed);
                }
                None => tracing::warn!(
                    "Unparseable wireless link speed '{}' for client {}",
                    device.wireless_link_speed,
                    device.mac_address
                ),
            }
            match parse_value(&device.wireless_signal_strength) {
                Some(strength) => {
                    self.wireless_strength.get_or_create(&labels).set(strength);
                }
                None => tracing::warn!(
                    "Unparseable wireless signal strength '{}' for client {}",
                    device.wireless_signal_strength,
                    device.mac_address
                ),
            }
        }
    }
}

/// Publishes one presence row per attached device
pub struct ClientCollector {
    client: Arc<SessionClient>,
    metrics: ClientMetrics,
    descriptors: Vec<MetricDescriptor>,
}

impl ClientCollector {
    pub(crate) fn new(mut set: MetricSet<'_>, client: Arc<SessionClient>) -> Self {
        let metrics = ClientMetrics::register(&mut set);
        Self {
            client,
            metrics,
            descriptors: set.into_descriptors(),
        }
    }
}

#[async_trait]
impl StatCollector for ClientCollector {
    fn kind(&self) -> CollectorKind {
        CollectorKind::Client
    }

    fn describe(&self) -> &[MetricDescriptor] {
        &self.descriptors
    }

    fn health(&self) -> &ScrapeHealth {
        &self.metrics.health
    }

    async fn poll(&self) -> Result<()> {
        let devices = self.client.get_attach_device().await?;
        tracing::debug!("Router reported {} attached devices", devices.len());
        self.metrics.publish(&devices);
        Ok(())
    }
}
