use material_market::api::{self, AppState, DiscoverySettings, StaticTokenVerifier};
use material_market::config::load_config;
use material_market::lifecycle::{setup_tracing, MarketSystem};
use material_market::seed::seed_demo;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    setup_tracing(&config.log_level, config.log_json);

    info!(address = %config.bind_address(), "Starting material market");
    let system = MarketSystem::new(config.actor_buffer);

    let verifier = if config.demo_seed {
        let seed = seed_demo(&system)
            .instrument(tracing::info_span!("demo_seed"))
            .await?;
        seed.verifier()
    } else {
        StaticTokenVerifier::new()
    };

    let state = AppState::new(
        &system,
        Arc::new(verifier),
        DiscoverySettings::from(&config.discovery),
    );
    let listener = TcpListener::bind(config.bind_address()).await?;
    api::serve(listener, state).await?;

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
