use anyhow::Context;
use clap::Parser;
use libsubprobe::{NetlifyClient, Prober};
use std::sync::Arc;

mod config;
mod logging;
mod routes;

use config::{AppConfig, Args};
use routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Real environment wins over .env
    dotenv::dotenv().ok();

    let args = Args::parse();
    logging::init(args.verbose);

    let config = AppConfig::from_args(&args)?;

    if args.list_sites {
        return list_sites(&config).await;
    }

    serve(config).await
}

async fn list_sites(config: &AppConfig) -> anyhow::Result<()> {
    let netlify = NetlifyClient::new(config.access_key.clone())?;
    let sites = netlify.list_custom_domains().await;
    println!("{}", serde_json::to_string_pretty(&sites)?);
    Ok(())
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let prober = Prober::with_config(config.probe.clone())?;
    let app = routes::router(AppState {
        prober,
        parent_domain: Arc::from(config.parent_domain.as_str()),
    });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.bind,
        domain = %config.parent_domain,
        "fosscu subdomain checker listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
