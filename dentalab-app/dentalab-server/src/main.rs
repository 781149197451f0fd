use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use dentalab_api::{build_router, AppState, Repositories};
use dentalab_infrastructure::{
    InMemoryClientRepository, InMemoryLaboratoryRepository, InMemoryOrderRepository,
    InMemoryProsthesisRepository, InMemoryTechnicianRepository,
};
use dentalab_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    dentalab_shared::telemetry::init_telemetry();

    info!("Dentalab server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        env = %config.app.env,
        tenant_source = ?config.auth.tenant_source,
        "Configuration loaded"
    );

    // In-memory storage; contents are lost on restart.
    let repos = Repositories {
        laboratories: Arc::new(InMemoryLaboratoryRepository::new()),
        clients: Arc::new(InMemoryClientRepository::new()),
        orders: Arc::new(InMemoryOrderRepository::new()),
        prostheses: Arc::new(InMemoryProsthesisRepository::new()),
        technicians: Arc::new(InMemoryTechnicianRepository::new()),
    };

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));

    let app = build_router(AppState::new(config, repos));

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
