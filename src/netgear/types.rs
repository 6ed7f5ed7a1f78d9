// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Type definitions for decoded router responses

use std::collections::HashMap;

/// Flat field map decoded from a system info or traffic meter response
pub type DecodedRecord = HashMap<String, String>;

/// One device from the router's attached-device list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub ip_address: String,
    pub name: String,
    pub mac_address: String,
    pub connection_type: String,
    pub wireless_link_speed: String,
    pub wireless_signal_strength: String,
}

impl DeviceRecord {
    /// Wired devices carry no meaningful wireless statistics
    #[must_use]
    pub fn is_wired(&self) -> bool {
        self.connection_type.eq_ignore_ascii_case("wired")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(connection_type: &str) -> DeviceRecord {
        DeviceRecord {
            ip_address: "192.168.1.10".to_string(),
            name: "laptop".to_string(),
            mac_address: "aa:bb:cc:dd:ee:ff".to_string(),
            connection_type: connection_type.to_string(),
            wireless_link_speed: "144".to_string(),
            wireless_signal_strength: "70".to_string(),
        }
    }

    #[test]
    fn test_wired_detection() {
        assert!(device("wired").is_wired());
        assert!(device("Wired").is_wired());
        assert!(!device("2.4GHz").is_wired());
        assert!(!device("5GHz").is_wired());
    }
}
