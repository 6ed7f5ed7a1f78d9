// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! ```rust
//! use netgear_exporter::prelude::*;
//! ```

// Core types
pub use crate::config::{Config, RouterConfig};
pub use crate::error::{AppError, Result};
pub use crate::filter::{CollectorFilter, CollectorKind};

// Metrics types
pub use crate::collector::StatCollector;
pub use crate::metrics::{MetricDescriptor, MetricsRegistry};

// Netgear client
pub use crate::netgear::{DecodedRecord, DeviceRecord, Operation, SessionClient};
