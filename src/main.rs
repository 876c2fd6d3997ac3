use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use bruteforce_protection_service::api;
use bruteforce_protection_service::config::Settings;
use bruteforce_protection_service::service::ProtectionService;
use bruteforce_protection_service::utils::init_logging;

/// How often drained rate-limiter windows are swept
const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging();
    tracing::info!("Starting brute-force protection service...");

    // Load configuration
    let settings = Settings::load().context("failed to load configuration")?;
    tracing::info!(
        host = %settings.server.host,
        port = %settings.server.port,
        blocklist_path = %settings.blocklist.path,
        "Configuration loaded"
    );

    // Make sure the blocklist's data directory exists before the first write
    if let Some(dir) = Path::new(&settings.blocklist.path).parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
    }

    let service = Arc::new(ProtectionService::new(&settings));

    // Periodic sweep of rate-limiter entries for IPs that went quiet
    let sweeper = service.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = sweeper.sweep_idle_windows().await;
            if removed > 0 {
                tracing::debug!(removed = %removed, "swept idle rate-limiter windows");
            }
        }
    });

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    let app = api::router(service);

    tracing::info!(%addr, "listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("server error")?;

    Ok(())
}
