// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Error types for Netgear Exporter application

use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid construction-time input; fatal at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network, TLS or timeout failure talking to the router
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Unexpected SOAP response shape or response code
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Login rejected, or re-login did not clear a 401
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Response bytes are not well-formed XML or lack the expected nodes
    #[error("Decode error: {0}")]
    Decode(String),

    /// Metrics encoding error
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Network or IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// Address parsing error
    #[error("Address parse error")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl From<quick_xml::Error> for AppError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(error: std::fmt::Error) -> Self {
        Self::Metrics(error.to_string())
    }
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = AppError::Config("test error".to_string());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_protocol_error() {
        let err = AppError::Protocol("unexpected ResponseCode 501".to_string());
        assert_eq!(err.to_string(), "Protocol error: unexpected ResponseCode 501");
    }

    #[test]
    fn test_auth_error() {
        let err = AppError::Auth("not logged in".to_string());
        assert_eq!(err.to_string(), "Authentication error: not logged in");
    }

    #[test]
    fn test_decode_error() {
        let err = AppError::Decode("missing Body".to_string());
        assert_eq!(err.to_string(), "Decode error: missing Body");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_addr_parse_error_conversion() {
        let parse_result = "invalid".parse::<std::net::SocketAddr>();
        assert!(parse_result.is_err());
        let app_err: AppError = parse_result.unwrap_err().into();
        assert!(matches!(app_err, AppError::AddrParse(_)));
    }

    #[test]
    fn test_fmt_error_conversion() {
        let app_err: AppError = std::fmt::Error.into();
        assert!(matches!(app_err, AppError::Metrics(_)));
    }
}
