// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Record shapes built on top of the decoded tree

use crate::error::{AppError, Result};
use crate::netgear::types::{DecodedRecord, DeviceRecord};

use super::ResponseNode;

/// Positional field count of one device segment (index 0 is reserved)
const DEVICE_FIELDS: usize = 7;

/// Flattens the payload's immediate children into a field map.
///
/// Names lose their `New` prefix and values lose thousands separators. With
/// `split_averages`, a `total/average` value yields `Field` and `FieldAverage`.
///
/// # Errors
///
/// Returns `AppError::Decode` when the document carries no payload element.
pub(crate) fn decode_flat(root: &ResponseNode, split_averages: bool) -> Result<DecodedRecord> {
    let payload = root
        .payload()
        .ok_or_else(|| AppError::Decode("response body has no payload element".to_string()))?;

    let mut record = DecodedRecord::new();
    for node in &payload.children {
        let name = node.name.strip_prefix("New").unwrap_or(&node.name);
        let value = node.text.replace(',', "");

        match value.find('/') {
            Some(idx) if split_averages && idx > 0 => {
                record.insert(format!("{name}Average"), value[idx + 1..].to_string());
                record.insert(name.to_string(), value[..idx].to_string());
            }
            _ => {
                record.insert(name.to_string(), value);
            }
        }
    }
    Ok(record)
}

/// Parses the `@`/`;` delimited attached-device blob.
///
/// The blob is the text of the payload's first child, HTML-escaped a second
/// time by the firmware. Segment 0 is a device count and is skipped; segments
/// with fewer than seven fields are logged and skipped.
///
/// # Errors
///
/// Returns `AppError::Decode` when the payload or its blob node is missing.
pub(crate) fn decode_devices(root: &ResponseNode) -> Result<Vec<DeviceRecord>> {
    let blob = root
        .payload()
        .and_then(|payload| payload.children.first())
        .ok_or_else(|| AppError::Decode("attached device response has no device list".to_string()))?;

    let data = html_escape::decode_html_entities(&blob.text);
    let mut devices = Vec::new();
    for (index, segment) in data.split('@').enumerate().skip(1) {
        let fields: Vec<&str> = segment.split(';').collect();
        if fields.len() < DEVICE_FIELDS {
            tracing::warn!(
                "Skipping malformed device record #{} ({} fields): '{}'",
                index,
                fields.len(),
                segment
            );
            continue;
        }
        devices.push(DeviceRecord {
            ip_address: fields[1].to_string(),
            name: fields[2].to_string(),
            mac_address: fields[3].to_string(),
            connection_type: fields[4].to_string(),
            wireless_link_speed: fields[5].to_string(),
            wireless_signal_strength: fields[6].to_string(),
        });
    }
    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::super::decode;
    use super::*;

    fn device_response(blob: &str) -> ResponseNode {
        let xml = format!(
            "<m:GetAttachDeviceResponse xmlns:m=\"urn:x\"><NewAttachDevice>{blob}</NewAttachDevice></m:GetAttachDeviceResponse><ResponseCode>000</ResponseCode>"
        );
        decode(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_flat_strips_prefix_and_commas() {
        let root = decode(b"<Resp><NewCPUUtilization>1,234</NewCPUUtilization><Plain>7</Plain></Resp>").unwrap();
        let record = decode_flat(&root, false).unwrap();
        assert_eq!(record.get("CPUUtilization").map(String::as_str), Some("1234"));
        assert_eq!(record.get("Plain").map(String::as_str), Some("7"));
        assert!(!record.contains_key("NewCPUUtilization"));
    }

    #[test]
    fn test_flat_splits_averages() {
        let root = decode(b"<Resp><NewWeekDownload>500/100</NewWeekDownload><NewTodayUpload>1,024.5</NewTodayUpload></Resp>").unwrap();
        let record = decode_flat(&root, true).unwrap();
        assert_eq!(record.get("WeekDownload").map(String::as_str), Some("500"));
        assert_eq!(record.get("WeekDownloadAverage").map(String::as_str), Some("100"));
        assert_eq!(record.get("TodayUpload").map(String::as_str), Some("1024.5"));
        assert!(!record.contains_key("TodayUploadAverage"));
    }

    #[test]
    fn test_flat_without_split_keeps_slash() {
        let root = decode(b"<Resp><NewValue>500/100</NewValue></Resp>").unwrap();
        let record = decode_flat(&root, false).unwrap();
        assert_eq!(record.get("Value").map(String::as_str), Some("500/100"));
    }

    #[test]
    fn test_flat_requires_payload() {
        let root = decode(b"<ResponseCode>000</ResponseCode>").unwrap();
        assert!(decode_flat(&root, false).is_err());
    }

    #[test]
    fn test_devices_from_blob() {
        let root = device_response(
            "@;1.2.3.4;host1;aa:bb:cc:dd:ee:ff;wired;0;0@;1.2.3.5;host2;11:22:33:44:55:66;2.4GHz;65;80",
        );
        let devices = decode_devices(&root).unwrap();
        assert_eq!(devices.len(), 2);

        assert_eq!(devices[0].ip_address, "1.2.3.4");
        assert_eq!(devices[0].name, "host1");
        assert_eq!(devices[0].connection_type, "wired");
        assert!(devices[0].is_wired());

        assert_eq!(devices[1].mac_address, "11:22:33:44:55:66");
        assert_eq!(devices[1].wireless_link_speed, "65");
        assert_eq!(devices[1].wireless_signal_strength, "80");
        assert!(!devices[1].is_wired());
    }

    #[test]
    fn test_devices_unescape_double_encoded_names() {
        let root = device_response("2@1;10.0.0.2;Tom&amp;amp;Jerry;aa:aa:aa:aa:aa:aa;wired;;");
        let devices = decode_devices(&root).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "Tom&Jerry");
    }

    #[test]
    fn test_devices_skip_malformed_segment() {
        let root = device_response("2@1;10.0.0.2;short@2;10.0.0.3;ok;bb:bb:bb:bb:bb:bb;5GHz;866;71");
        let devices = decode_devices(&root).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].ip_address, "10.0.0.3");
    }

    #[test]
    fn test_devices_empty_list() {
        let root = device_response("0");
        assert!(decode_devices(&root).unwrap().is_empty());
    }

    #[test]
    fn test_devices_require_blob_node() {
        let root = decode(b"<m:GetAttachDeviceResponse xmlns:m=\"urn:x\"/>").unwrap();
        assert!(decode_devices(&root).is_err());
    }
}
