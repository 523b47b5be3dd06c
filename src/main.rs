use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sehat::settings::Settings;
use sehat::{build_service, interfaces::http};

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sehat=debug")))
        .with(fmt::layer().with_target(true))
        .init();

    info!(
        "starting heart disease prediction service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let settings = Settings::from_env();
    info!("model directory: {}", settings.model_dir.display());

    let service = build_service(&settings.model_dir);
    if !service.is_ready() {
        warn!("starting in degraded mode; predictions will return 503 until artifacts are restored and the service is restarted");
    }

    let app = http::router(service);

    let addr: SocketAddr = settings
        .bind_addr()
        .parse()
        .with_context(|| format!("invalid bind address {}", settings.bind_addr()))?;

    info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to install ctrl-c handler: {err}");
        return;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("[sehat] service failed: {err:?}");
        std::process::exit(1);
    }
}
