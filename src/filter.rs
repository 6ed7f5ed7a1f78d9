// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Selection of the stat collectors that are polled on scrape

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};

/// The stat collectors this exporter knows about
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CollectorKind {
    Client,
    SystemInfo,
    Traffic,
}

impl CollectorKind {
    pub const ALL: [CollectorKind; 3] = [
        CollectorKind::Client,
        CollectorKind::SystemInfo,
        CollectorKind::Traffic,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::SystemInfo => "SystemInfo",
            Self::Traffic => "Traffic",
        }
    }
}

impl fmt::Display for CollectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectorKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Client" => Ok(Self::Client),
            "SystemInfo" => Ok(Self::SystemInfo),
            "Traffic" => Ok(Self::Traffic),
            _ => Err(AppError::Config(format!(
                "Collector filter `{s}` is not supported"
            ))),
        }
    }
}

/// Set of enabled collectors; an empty set enables every collector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectorFilter {
    enabled: HashSet<CollectorKind>,
}

impl CollectorFilter {
    /// Builds a filter from requested collector names.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first unrecognized name.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let enabled = names
            .into_iter()
            .map(|name| name.as_ref().parse::<CollectorKind>())
            .collect::<Result<HashSet<_>>>()?;
        Ok(Self { enabled })
    }

    #[must_use]
    pub fn is_enabled(&self, kind: CollectorKind) -> bool {
        self.enabled.is_empty() || self.enabled.contains(&kind)
    }

    /// Enabled collectors in their fixed registration order
    pub fn enabled_kinds(&self) -> impl Iterator<Item = CollectorKind> + '_ {
        CollectorKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
    }
}
