// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! SOAP operations understood by Netgear router firmware

use quick_xml::escape::escape;

/// A remote SOAP operation with a fixed action URI and envelope template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    AttachDevice,
    SystemInfo,
    TrafficMeter,
}

impl Operation {
    #[must_use]
    pub fn soap_action(self) -> &'static str {
        match self {
            Self::Login => "urn:NETGEAR-ROUTER:service:DeviceConfig:1#SOAPLogin",
            Self::AttachDevice => "urn:NETGEAR-ROUTER:service:DeviceInfo:1#GetAttachDevice",
            Self::SystemInfo => "urn:NETGEAR-ROUTER:service:DeviceInfo:1#GetSystemInfo",
            Self::TrafficMeter => {
                "urn:NETGEAR-ROUTER:service:DeviceConfig:1#GetTrafficMeterStatistics"
            }
        }
    }

    /// Whether a 401 on this operation may trigger a login
    #[must_use]
    pub fn allows_login(self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Renders the request envelope; credentials are only used by `Login`
    #[must_use]
    pub fn render(self, session_id: &str, username: &str, password: &str) -> String {
        let body = match self {
            Self::Login => format!(
                r#"<M1:SOAPLogin xmlns:M1="urn:NETGEAR-ROUTER:service:DeviceConfig:1">
      <Username>{}</Username>
      <Password>{}</Password>
    </M1:SOAPLogin>"#,
                escape(username),
                escape(password)
            ),
            Self::AttachDevice => r#"<M1:GetAttachDevice xsi:nil="true" />"#.to_string(),
            Self::SystemInfo => r#"<M1:GetSystemInfo xsi:nil="true" />"#.to_string(),
            Self::TrafficMeter => r#"<M1:GetTrafficMeterStatistics xmlns:M1="urn:NETGEAR-ROUTER:service:DeviceConfig:1">
    </M1:GetTrafficMeterStatistics>"#
                .to_string(),
        };
        envelope(&escape(session_id), &body)
    }
}

fn envelope(session_id: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<SOAP-ENV:Envelope
  xmlns:SOAPSDK1="http://www.w3.org/2001/XMLSchema"
  xmlns:SOAPSDK2="http://www.w3.org/2001/XMLSchema-instance"
  xmlns:SOAPSDK3="http://schemas.xmlsoap.org/soap/encoding/"
  xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Header>
    <SessionID>{session_id}</SessionID>
  </SOAP-ENV:Header>
  <SOAP-ENV:Body>
    {body}
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
    )
}
