//! HTTP server startup and routing

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::api;
use crate::core::{Config, ServerState};

/// HTTP server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create a server over existing state (shared with tests/tools)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Build the full application router
    pub fn build_router(state: ServerState) -> Router {
        Router::new()
            .merge(api::health::router())
            .merge(api::carts::router())
            .merge(api::orders::router())
            .merge(api::reviews::router())
            .merge(api::rewards::router())
            .merge(api::menu::router())
            .merge(api::tables::router())
            .merge(api::notifications::router())
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
            .with_state(state)
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config)?,
        };

        state.start_background_tasks();

        let app = Self::build_router(state);
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, "Cafe server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutting down...");
            })
            .await?;

        Ok(())
    }
}
