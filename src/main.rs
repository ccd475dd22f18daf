// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use getdash::application::dashboard_builder::DashboardBuilder;
use getdash::application::dashboard_service::DashboardService;
use getdash::infrastructure::catalog_loader::CatalogLoader;
use getdash::infrastructure::config::load_settings;
use getdash::infrastructure::influx_repository::InfluxRepository;
use getdash::presentation::app_state::AppState;
use getdash::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let settings = load_settings()?;

    // Create sources (infrastructure layer)
    let repository = Arc::new(InfluxRepository::new(
        settings.influx.url.clone(),
        settings.influx.database.clone(),
        settings.influx.user.clone(),
        settings.influx.password.clone(),
        settings.influx.timeout(),
    )?);
    let catalog_loader = Arc::new(CatalogLoader::new(&settings.catalog.source, settings.influx.timeout())?);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(
        repository,
        catalog_loader,
        DashboardBuilder::new(settings.dashboard.series_prefix.clone()),
    );

    // Build router (presentation layer)
    // Responses are compressed by the handlers themselves, so no compression layer here
    let state = Arc::new(AppState { dashboard_service });
    let app = router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = settings
        .server
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address {}", settings.server.listen))?;
    tracing::info!(
        influx = %settings.influx.url,
        catalog = %settings.catalog.source,
        "Starting getdash service on {}",
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
