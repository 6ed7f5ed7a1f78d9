// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Unit tests for configuration module

#[cfg(test)]
mod test {
    use super::super::*;
    use crate::filter::CollectorKind;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.router.url, "https://www.routerlogin.com");
        assert_eq!(config.router.username, "admin");
        assert_eq!(config.router.password.expose_secret(), "");
        assert_eq!(config.router.timeout_secs, 2);
        assert!(!config.router.insecure);
        assert!(!config.router.debug);
        assert!(!config.calculate_delta);
        assert!(!config.print_metrics);
        assert_eq!(config.metrics_namespace, "netgear");
        assert_eq!(config.web.listen_address.to_string(), "0.0.0.0:9192");
        assert_eq!(config.web.telemetry_path, "/metrics");
        assert!(config.web.basic_auth.is_none());
        assert!(config.web.tls.is_none());
        for kind in CollectorKind::ALL {
            assert!(config.collectors.is_enabled(kind));
        }
    }

    #[test]
    fn test_router_settings() {
        let config = load(&[
            ("NETGEAR_EXPORTER_URL", "192.168.1.1"),
            ("NETGEAR_EXPORTER_USERNAME", "monitor"),
            ("NETGEAR_EXPORTER_PASSWORD", "secret"),
            ("NETGEAR_EXPORTER_INSECURE", "true"),
            ("NETGEAR_EXPORTER_TIMEOUT", "10"),
            ("NETGEAR_EXPORTER_CLIENT_DEBUG", "yes"),
        ])
        .unwrap();
        assert_eq!(config.router.url, "192.168.1.1");
        assert_eq!(config.router.username, "monitor");
        assert_eq!(config.router.password.expose_secret(), "secret");
        assert!(config.router.insecure);
        assert_eq!(config.router.timeout_secs, 10);
        assert!(config.router.debug);
    }

    #[test]
    fn test_collector_filter_list() {
        let config = load(&[("NETGEAR_EXPORTER_FILTER_COLLECTORS", "Traffic, SystemInfo")]).unwrap();
        assert!(config.collectors.is_enabled(CollectorKind::Traffic));
        assert!(config.collectors.is_enabled(CollectorKind::SystemInfo));
        assert!(!config.collectors.is_enabled(CollectorKind::Client));
    }

    #[test]
    fn test_unknown_collector_is_fatal() {
        let err = load(&[("NETGEAR_EXPORTER_FILTER_COLLECTORS", "Traffic,Bogus")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_bool_is_fatal() {
        assert!(load(&[("NETGEAR_EXPORTER_CALCULATE_DELTA", "sometimes")]).is_err());
    }

    #[test]
    fn test_invalid_timeout_is_fatal() {
        assert!(load(&[("NETGEAR_EXPORTER_TIMEOUT", "0")]).is_err());
        assert!(load(&[("NETGEAR_EXPORTER_TIMEOUT", "two")]).is_err());
    }

    #[test]
    fn test_listen_address_forms() {
        let config = load(&[("NETGEAR_EXPORTER_WEB_LISTEN_ADDRESS", "127.0.0.1:9300")]).unwrap();
        assert_eq!(config.web.listen_address.to_string(), "127.0.0.1:9300");
        assert!(load(&[("NETGEAR_EXPORTER_WEB_LISTEN_ADDRESS", "localhost")]).is_err());
    }

    #[test]
    fn test_namespace_validation() {
        assert!(load(&[("NETGEAR_EXPORTER_METRICS_NAMESPACE", "home_router")]).is_ok());
        assert!(load(&[("NETGEAR_EXPORTER_METRICS_NAMESPACE", "9lives")]).is_err());
        assert!(load(&[("NETGEAR_EXPORTER_METRICS_NAMESPACE", "net-gear")]).is_err());
    }

    #[test]
    fn test_telemetry_path_validation() {
        assert!(load(&[("NETGEAR_EXPORTER_WEB_TELEMETRY_PATH", "/stats")]).is_ok());
        assert!(load(&[("NETGEAR_EXPORTER_WEB_TELEMETRY_PATH", "stats")]).is_err());
        assert!(load(&[("NETGEAR_EXPORTER_WEB_TELEMETRY_PATH", "/health")]).is_err());
    }

    #[test]
    fn test_basic_auth_requires_both_values() {
        let config = load(&[("NETGEAR_EXPORTER_WEB_AUTH_USERNAME", "prom")]).unwrap();
        assert!(config.web.basic_auth.is_none());

        let config = load(&[
            ("NETGEAR_EXPORTER_WEB_AUTH_USERNAME", "prom"),
            ("NETGEAR_EXPORTER_WEB_AUTH_PASSWORD", "scrape"),
        ])
        .unwrap();
        let auth = config.web.basic_auth.unwrap();
        assert_eq!(auth.username, "prom");
        assert_eq!(auth.password.expose_secret(), "scrape");
    }

    #[test]
    fn test_tls_requires_both_files() {
        let config = load(&[("NETGEAR_EXPORTER_WEB_TLS_CERTFILE", "/etc/cert.pem")]).unwrap();
        assert!(config.web.tls.is_none());

        let config = load(&[
            ("NETGEAR_EXPORTER_WEB_TLS_CERTFILE", "/etc/cert.pem"),
            ("NETGEAR_EXPORTER_WEB_TLS_KEYFILE", "/etc/key.pem"),
        ])
        .unwrap();
        let tls = config.web.tls.unwrap();
        assert_eq!(tls.cert_file, PathBuf::from("/etc/cert.pem"));
        assert_eq!(tls.key_file, PathBuf::from("/etc/key.pem"));
    }
}
