use payflow_link_adapter::api::{self, AppState};
use payflow_link_adapter::config::Config;
use payflow_link_adapter::payments::transport::{ReqwestTransport, TransportConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting Payflow Link adapter");
    tracing::info!("Payflow mode: {}", config.payflow.mode);

    let transport = ReqwestTransport::new(TransportConfig {
        timeout: config.payflow.timeout,
        ..Default::default()
    })?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = api::router(AppState::new(config, Arc::new(transport)));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
