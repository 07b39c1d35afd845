use kernel_sim::internal::{
    api::{create_router, AppState},
    config::load_config,
    kernel::Kernel,
};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ADDR: &str = "0.0.0.0:7777";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "kernel_sim=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config();
    config.validate()?;
    tracing::info!(
        time_quantum = config.time_quantum,
        memory_size = config.memory_size,
        unit_cost_ms = config.unit_cost_ms,
        "Kernel configured"
    );

    let app = create_router(AppState::new(Kernel::from_config(&config)));

    let addr: SocketAddr = std::env::var("KERNEL_SIM_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    tracing::info!("Kernel simulator API server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
