use std::sync::Arc;

use crate::catalog::Catalog;
use crate::core::config::StoreBackend;
use crate::core::{Config, Result};
use crate::reservations::ReservationService;
use crate::store::{MemoryStore, RedbStore, ReservationStore};

/// 服务器状态 - 所有 handler 共享
///
/// Clone 只复制 `Arc`，开销很小。
#[derive(Debug, Clone)]
pub struct ServerState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub reservations: ReservationService,
}

impl ServerState {
    pub fn new(config: Config, catalog: Arc<Catalog>, store: Arc<dyn ReservationStore>) -> Self {
        let reservations = ReservationService::new(Arc::clone(&catalog), store);
        Self {
            config,
            catalog,
            reservations,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录结构 (database/, logs/)
    /// 2. 目录 (CATALOG_FILE 或内置)
    /// 3. 存储后端 (redb: work_dir/database/reservations.redb)
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let catalog = Arc::new(Catalog::load(config.catalog_file.as_deref())?);

        let store: Arc<dyn ReservationStore> = match config.store_backend {
            StoreBackend::Redb => {
                let path = config.database_path();
                let timeout = config.store_timeout();
                let store = tokio::task::spawn_blocking(move || RedbStore::open(path, timeout))
                    .await
                    .map_err(|e| anyhow::anyhow!("store open task failed: {e}"))??;
                Arc::new(store)
            }
            StoreBackend::Memory => Arc::new(MemoryStore::new(config.store_timeout())),
        };

        tracing::info!(
            backend = store.backend(),
            tables = catalog.tables.len(),
            max_capacity = catalog.tables.max_capacity(),
            "Server state initialized"
        );

        Ok(Self::new(config.clone(), catalog, store))
    }
}
