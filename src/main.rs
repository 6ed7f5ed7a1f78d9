// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netgear_exporter::{AppError, AppState, Config, MetricsRegistry, Result, SessionClient};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    setup_tracing();

    let config = Config::from_env().map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    if config.print_metrics {
        print_metrics(&config);
        return Ok(());
    }

    tracing::info!(
        "Starting netgear-exporter {} for router {}",
        env!("CARGO_PKG_VERSION"),
        config.router.url
    );

    let client = Arc::new(SessionClient::new(&config.router).map_err(|e| {
        tracing::error!("Error creating Netgear client: {}", e);
        e
    })?);
    tracing::info!("Using router SOAP endpoint at {}", client.base_url());

    let metrics = MetricsRegistry::new(
        &config.metrics_namespace,
        client,
        &config.collectors,
        config.calculate_delta,
    );

    let addr = config.web.listen_address;
    let tls = config.web.tls.clone();
    let telemetry_path = config.web.telemetry_path.clone();
    let state = Arc::new(AppState { config, metrics });

    // Канал завершения (graceful shutdown)
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    let app = netgear_exporter::create_router(state)
        .into_make_service_with_connect_info::<SocketAddr>();

    tracing::info!("Endpoints:");
    tracing::info!("  - GET /        - Landing page");
    tracing::info!("  - GET /health  - Health check");
    tracing::info!("  - GET {} - Prometheus metrics", telemetry_path);

    if let Some(tls) = tls {
        // rustls needs a process-wide crypto provider before building server configs
        let _ = rustls::crypto::ring::default_provider().install_default();
        let rustls = RustlsConfig::from_pem_file(&tls.cert_file, &tls.key_file)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to load TLS certificate {} / key {}: {}",
                    tls.cert_file.display(),
                    tls.key_file.display(),
                    e
                );
                AppError::Io(e)
            })?;

        let handle = Handle::new();
        tokio::spawn({
            let handle = handle.clone();
            async move {
                let _ = shutdown_rx.changed().await;
                tracing::info!("HTTPS server shutting down");
                handle.graceful_shutdown(None);
            }
        });

        tracing::info!("Netgear Exporter listening on https://{}", addr);
        axum_server::bind_rustls(addr, rustls)
            .handle(handle)
            .serve(app)
            .await
            .map_err(|e| {
                tracing::error!("Server error: {}", e);
                e
            })?;
    } else {
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind address: {}", e);
            e
        })?;

        tracing::info!("Netgear Exporter listening on http://{}", addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
                tracing::info!("HTTP server shutting down");
            })
            .await
            .map_err(|e| {
                tracing::error!("Server error: {}", e);
                e
            })?;
    }

    Ok(())
}

/// Lists every metric the enabled collectors expose, grouped by collector
fn print_metrics(config: &Config) {
    let groups = MetricsRegistry::describe_for(
        &config.metrics_namespace,
        &config.collectors,
        config.calculate_delta,
    );
    for (kind, descriptors) in groups {
        println!("{kind}");
        for descriptor in descriptors {
            println!("  {} - {}", descriptor.name, descriptor.help);
        }
    }
}

fn setup_tracing() {
    // RUST_LOG, по умолчанию "info"
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
