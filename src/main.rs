//! PoloMarket identity server - main entry point.

use anyhow::Result;
use polomarket_identity::repositories::{InMemoryUserRepository, UserRepository};
use polomarket_identity::services::{RegistrationService, RegistrationServiceImpl};
use polomarket_identity::{Config, IdentityMcpServer, MetricsTracker};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // stderr only: stdout carries the MCP stream
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        server_name = %config.server_name,
        require_rut = config.require_rut,
        "Configuration loaded"
    );

    let metrics = MetricsTracker::new();
    let users = Arc::new(InMemoryUserRepository::new()) as Arc<dyn UserRepository>;
    let registration = Arc::new(RegistrationServiceImpl::new(
        users,
        config.require_rut,
        config.max_list_results,
        metrics.clone(),
    )) as Arc<dyn RegistrationService>;

    let server = IdentityMcpServer::new(registration, metrics.clone(), &config.server_name);

    info!("Starting MCP server with stdio transport");
    polomarket_identity::server::run_server(server).await?;

    info!("{}", metrics.summary());
    info!("Identity server shutdown complete");
    Ok(())
}
