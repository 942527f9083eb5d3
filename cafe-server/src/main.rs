use cafe_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, work dir, logging)
    setup_environment()?;

    tracing::info!("Cafe server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. State (storage, engine, catalog)
    let state = ServerState::initialize(&config)?;

    // 4. HTTP server (spawns background tasks)
    let server = Server::with_state(config, state);
    server.run().await
}
