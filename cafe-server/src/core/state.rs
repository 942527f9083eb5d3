use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::catalog::CatalogRepository;
use crate::core::Config;
use crate::engine::{CoreStorage, OrderingEngine};
use crate::notifications::{NotificationWorker, StoreSink};

/// Shared server state - one engine, one store, cheap to clone
///
/// | Field | Purpose |
/// |-------|---------|
/// | `config` | Immutable configuration |
/// | `storage` | redb store (shared with the engine) |
/// | `engine` | Transactional ordering engine |
/// | `catalog` | Catalog admin repository |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub storage: CoreStorage,
    pub engine: Arc<OrderingEngine>,
    pub catalog: CatalogRepository,
}

impl ServerState {
    /// Open storage under the configured work dir and wire everything up
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        let work_dir = PathBuf::from(&config.work_dir);
        std::fs::create_dir_all(&work_dir)?;

        let db_path = work_dir.join("cafe.redb");
        let storage = CoreStorage::open(&db_path)?;
        info!(path = %db_path.display(), "Storage opened");

        let engine = Arc::new(OrderingEngine::new(storage.clone(), config.timezone));
        let catalog = CatalogRepository::new(storage.clone());

        Ok(Self {
            config: config.clone(),
            storage,
            engine,
            catalog,
        })
    }

    /// State over in-memory storage (for tests)
    pub fn in_memory(config: &Config) -> anyhow::Result<Self> {
        let storage = CoreStorage::open_in_memory()?;
        let engine = Arc::new(OrderingEngine::new(storage.clone(), config.timezone));
        let catalog = CatalogRepository::new(storage.clone());
        Ok(Self {
            config: config.clone(),
            storage,
            engine,
            catalog,
        })
    }

    /// Spawn the long-running background tasks
    pub fn start_background_tasks(&self) {
        let worker = NotificationWorker::new(
            self.engine.subscribe(),
            StoreSink::new(self.storage.clone()),
        );
        tokio::spawn(worker.run());
        info!("Notification worker started");
    }
}
