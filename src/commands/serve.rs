use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use talentsync::config::Config;
use talentsync::server::TalentsyncServer;

/// Overrides for the serve command
#[derive(Debug, Default)]
pub struct ServeParams {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Run the scheduling API until Ctrl+C
pub async fn serve(mut config: Config, params: ServeParams) -> Result<()> {
    if params.host.is_some() || params.port.is_some() {
        let ip = match params.host {
            Some(host) => host
                .parse::<IpAddr>()
                .with_context(|| format!("Invalid bind host: {host}"))?,
            None => config.server.bind_address.ip(),
        };
        let port = params.port.unwrap_or(config.server.bind_address.port());
        config.server.bind_address = SocketAddr::new(ip, port);
    }

    if let Err(e) = talentsync::metrics::init_metrics() {
        tracing::warn!("Metrics initialization failed: {}", e);
    }

    let store = super::open_store(&config)?;
    let service = Arc::new(super::build_service(&config, &store)?);

    let server = TalentsyncServer::new(config.server.clone(), service)
        .context("Failed to create scheduling server")?;

    println!("{}", server.info().display());
    println!();
    println!("API Endpoints:");
    println!("  POST /schedule-interviews/    - Schedule ranked candidates and notify them");
    println!("  GET  /api/health              - Health check");
    println!("  GET  /api/calendar/{{date}}     - Slots for a date (YYYY-MM-DD)");
    println!("  GET  /metrics                 - Prometheus metrics endpoint");
    println!();
    println!("Press Ctrl+C to stop.\n");

    server
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await?;

    drop(server);
    super::close_store(store);

    println!("Scheduling server stopped.");
    Ok(())
}
