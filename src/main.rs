// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardSession;
use crate::infrastructure::config::{build_record_source, load_dashboard_config};
use crate::presentation::app_state::AppState;
use crate::presentation::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_dashboard_config()?;

    // Records are loaded once and held for the session
    let source = build_record_source(&config.source)?;
    let records = source.load().await?;
    let session = DashboardSession::new(records, config.kpi.composer_settings())?;

    let state = Arc::new(AppState::new(session, source));
    let router = router(state);

    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting cs-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
