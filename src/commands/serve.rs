use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};

use trendwire::config::Config;
use trendwire::provider::GoogleTrendsClient;
use trendwire::server::TrendServer;

/// CLI overrides for the serve command
pub struct ServeParams {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub enable_cors: bool,
}

/// Start the trend server
pub async fn serve(mut config: Config, params: ServeParams) -> Result<()> {
    let ServeParams {
        host,
        port,
        enable_cors,
    } = params;

    config.server.bind_address =
        override_bind_address(config.server.bind_address, host.as_deref(), port)?;
    config.server.enable_cors = config.server.enable_cors && enable_cors;

    let provider = GoogleTrendsClient::new(config.provider.clone())
        .context("Failed to create Google Trends client")?;

    let server = TrendServer::new(config.server.clone(), Arc::new(provider));

    println!("{}", server.info().display());
    println!();
    println!("API Endpoints:");
    println!("  GET  /api/trends?keyword=&timeframe=  - Interest over time");
    println!("  GET  /api/health                      - Health check");
    println!();
    println!("Listening on http://{}", config.server.bind_address);
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

    println!("Trend server stopped.");
    Ok(())
}

/// Replace the host and/or port of the configured address
fn override_bind_address(
    addr: SocketAddr,
    host: Option<&str>,
    port: Option<u16>,
) -> Result<SocketAddr> {
    let ip = match host {
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .with_context(|| format!("Invalid host: {host}"))?,
        None => addr.ip(),
    };

    Ok(SocketAddr::new(ip, port.unwrap_or(addr.port())))
}
