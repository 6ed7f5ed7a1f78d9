// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Utility functions for converting router values into samples

/// Parse a plain numeric router value
pub fn parse_value(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// Parse a Netgear `H:M` connection time into seconds
///
/// Hours and minutes are the two components of the split, so `2:30` is 9000.
/// A value without a colon is read as whole hours.
pub fn parse_connection_time(s: &str) -> Option<f64> {
    let s = s.trim();
    match s.split_once(':') {
        Some((hours, minutes)) => {
            let h = parse_value(hours)?;
            let m = parse_value(minutes)?;
            Some(h * 3600.0 + m * 60.0)
        }
        None => parse_value(s).map(|h| h * 3600.0),
    }
}

/// Field names ending in `Time` carry `H:M` durations
pub fn is_time_field(name: &str) -> bool {
    name.ends_with("Time")
}
