use gastro_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment setup (dotenv, logging)
    setup_environment();

    tracing::info!("Gastro server starting...");

    // Load configuration
    let config = Config::from_env();

    // Initialize server state (database, suggestion service)
    let state = ServerState::initialize(&config).await?;

    // Run the HTTP server until shutdown
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
