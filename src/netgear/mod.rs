// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Netgear router SOAP API module
//!
//! This module provides the session client that talks to the router's SOAP
//! management interface, the SOAP operations it supports, and decoding of the
//! XML responses into flat records and device lists.

mod client;
mod decode;
mod envelope;
mod operation;
mod types;

// Re-export public types and functions
pub use client::{SOAP_PATH, SESSION_ID, SessionClient};
pub use decode::ResponseNode;
pub use operation::Operation;
pub use types::{DecodedRecord, DeviceRecord};
