// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Label types for Prometheus metrics

use prometheus_client::encoding::EncodeLabelSet;

/// Identity of one attached device
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ClientLabels {
    pub ip: String,
    pub name: String,
    pub mac: String,
    pub connection_type: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct MacLabels {
    pub mac: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct BuildLabels {
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_labels_equality() {
        let labels1 = ClientLabels {
            ip: "192.168.1.2".to_string(),
            name: "nas".to_string(),
            mac: "aa:bb:cc:dd:ee:ff".to_string(),
            connection_type: "wired".to_string(),
        };
        let mut labels2 = labels1.clone();
        assert_eq!(labels1, labels2);

        labels2.ip = "192.168.1.3".to_string();
        assert_ne!(labels1, labels2);
    }

    #[test]
    fn test_mac_labels_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(
            MacLabels {
                mac: "aa:bb:cc:dd:ee:ff".to_string(),
            },
            65,
        );

        let lookup = MacLabels {
            mac: "aa:bb:cc:dd:ee:ff".to_string(),
        };
        assert_eq!(map.get(&lookup), Some(&65));
    }
}
