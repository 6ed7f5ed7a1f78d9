// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for Netgear Exporter application
//!
//! Loads and validates configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::{AppError, Result};
use crate::filter::CollectorFilter;

#[cfg(test)]
mod tests;

/// Default configuration values
pub mod defaults {
    pub const ROUTER_URL: &str = "https://www.routerlogin.com";
    pub const USERNAME: &str = "admin";
    pub const TIMEOUT_SECS: u64 = 2;
    pub const METRICS_NAMESPACE: &str = "netgear";
    pub const LISTEN_ADDRESS: &str = ":9192";
    pub const TELEMETRY_PATH: &str = "/metrics";
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const URL: &str = "NETGEAR_EXPORTER_URL";
    pub const USERNAME: &str = "NETGEAR_EXPORTER_USERNAME";
    pub const PASSWORD: &str = "NETGEAR_EXPORTER_PASSWORD";
    pub const INSECURE: &str = "NETGEAR_EXPORTER_INSECURE";
    pub const TIMEOUT: &str = "NETGEAR_EXPORTER_TIMEOUT";
    pub const CLIENT_DEBUG: &str = "NETGEAR_EXPORTER_CLIENT_DEBUG";
    pub const FILTER_COLLECTORS: &str = "NETGEAR_EXPORTER_FILTER_COLLECTORS";
    pub const CALCULATE_DELTA: &str = "NETGEAR_EXPORTER_CALCULATE_DELTA";
    pub const METRICS_NAMESPACE: &str = "NETGEAR_EXPORTER_METRICS_NAMESPACE";
    pub const LISTEN_ADDRESS: &str = "NETGEAR_EXPORTER_WEB_LISTEN_ADDRESS";
    pub const TELEMETRY_PATH: &str = "NETGEAR_EXPORTER_WEB_TELEMETRY_PATH";
    pub const AUTH_USERNAME: &str = "NETGEAR_EXPORTER_WEB_AUTH_USERNAME";
    pub const AUTH_PASSWORD: &str = "NETGEAR_EXPORTER_WEB_AUTH_PASSWORD";
    pub const TLS_CERT_FILE: &str = "NETGEAR_EXPORTER_WEB_TLS_CERTFILE";
    pub const TLS_KEY_FILE: &str = "NETGEAR_EXPORTER_WEB_TLS_KEYFILE";
    pub const PRINT_METRICS: &str = "NETGEAR_EXPORTER_PRINT_METRICS";
}

/// Connection settings for the router SOAP API
#[derive(Debug)]
pub struct RouterConfig {
    pub url: String,
    pub username: String,
    /// Validated as non-empty when the session client is built
    pub password: SecretString,
    pub insecure: bool,
    pub timeout_secs: u64,
    pub debug: bool,
}

/// Credentials guarding the metrics endpoint
#[derive(Debug)]
pub struct BasicAuth {
    pub username: String,
    pub password: SecretString,
}

/// PEM files for serving HTTPS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

/// HTTP listener settings
#[derive(Debug)]
pub struct WebConfig {
    pub listen_address: SocketAddr,
    pub telemetry_path: String,
    pub basic_auth: Option<BasicAuth>,
    pub tls: Option<TlsFiles>,
}

/// Application-wide configuration
#[derive(Debug)]
pub struct Config {
    pub router: RouterConfig,
    pub web: WebConfig,
    pub collectors: CollectorFilter,
    pub calculate_delta: bool,
    pub metrics_namespace: String,
    pub print_metrics: bool,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for any malformed value.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for any malformed value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let router = RouterConfig {
            url: var(env_vars::URL).unwrap_or_else(|| defaults::ROUTER_URL.to_string()),
            username: var(env_vars::USERNAME).unwrap_or_else(|| defaults::USERNAME.to_string()),
            password: SecretString::from(lookup(env_vars::PASSWORD).unwrap_or_default()),
            insecure: parse_bool(env_vars::INSECURE, var(env_vars::INSECURE))?,
            timeout_secs: parse_timeout(var(env_vars::TIMEOUT))?,
            debug: parse_bool(env_vars::CLIENT_DEBUG, var(env_vars::CLIENT_DEBUG))?,
        };

        let collectors = match var(env_vars::FILTER_COLLECTORS) {
            Some(list) => CollectorFilter::new(list.split(','))?,
            None => CollectorFilter::default(),
        };

        let metrics_namespace = var(env_vars::METRICS_NAMESPACE)
            .unwrap_or_else(|| defaults::METRICS_NAMESPACE.to_string());
        validate_namespace(&metrics_namespace)?;

        let web = WebConfig {
            listen_address: parse_listen_address(
                &var(env_vars::LISTEN_ADDRESS)
                    .unwrap_or_else(|| defaults::LISTEN_ADDRESS.to_string()),
            )?,
            telemetry_path: {
                let path = var(env_vars::TELEMETRY_PATH)
                    .unwrap_or_else(|| defaults::TELEMETRY_PATH.to_string());
                validate_telemetry_path(&path)?;
                path
            },
            basic_auth: match (var(env_vars::AUTH_USERNAME), var(env_vars::AUTH_PASSWORD)) {
                (Some(username), Some(password)) => Some(BasicAuth {
                    username,
                    password: SecretString::from(password),
                }),
                _ => None,
            },
            tls: match (var(env_vars::TLS_CERT_FILE), var(env_vars::TLS_KEY_FILE)) {
                (Some(cert), Some(key)) => Some(TlsFiles {
                    cert_file: PathBuf::from(cert),
                    key_file: PathBuf::from(key),
                }),
                (None, None) => None,
                _ => {
                    tracing::warn!(
                        "Both {} and {} are required for TLS; serving plain HTTP",
                        env_vars::TLS_CERT_FILE,
                        env_vars::TLS_KEY_FILE
                    );
                    None
                }
            },
        };

        Ok(Config {
            router,
            web,
            collectors,
            calculate_delta: parse_bool(
                env_vars::CALCULATE_DELTA,
                var(env_vars::CALCULATE_DELTA),
            )?,
            metrics_namespace,
            print_metrics: parse_bool(env_vars::PRINT_METRICS, var(env_vars::PRINT_METRICS))?,
        })
    }
}

fn parse_bool(key: &str, value: Option<String>) -> Result<bool> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{key} must be a boolean, got '{value}'"
        ))),
    }
}

fn parse_timeout(value: Option<String>) -> Result<u64> {
    let Some(value) = value else {
        return Ok(defaults::TIMEOUT_SECS);
    };
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(AppError::Config(format!(
            "{} must be a positive number of seconds, got '{value}'",
            env_vars::TIMEOUT
        ))),
        Ok(secs) => Ok(secs),
    }
}

/// Accepts `host:port` or a bare `:port` meaning all interfaces
fn parse_listen_address(value: &str) -> Result<SocketAddr> {
    let value = value.trim();
    let full = if value.starts_with(':') {
        format!("0.0.0.0{value}")
    } else {
        value.to_string()
    };
    full.parse().map_err(|e| {
        AppError::Config(format!("Invalid listen address '{value}': {e}"))
    })
}

fn validate_namespace(namespace: &str) -> Result<()> {
    let mut chars = namespace.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "Invalid metrics namespace '{namespace}'"
        )))
    }
}

fn validate_telemetry_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(AppError::Config(format!(
            "Telemetry path '{path}' must start with '/'"
        )));
    }
    if path == "/" || path == "/health" {
        return Err(AppError::Config(format!(
            "Telemetry path '{path}' collides with a built-in route"
        )));
    }
    Ok(())
}
