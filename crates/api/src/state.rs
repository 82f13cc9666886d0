use std::sync::Arc;

use stockmove_db::DbPool;
use stockmove_engine::InventoryEngine;

use crate::config::ServerConfig;
use crate::flash::FlashQueue;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    pub engine: Arc<dyn InventoryEngine>,
    pub flash: Arc<FlashQueue>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig, engine: Arc<dyn InventoryEngine>) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            engine,
            flash: Arc::new(FlashQueue::default()),
        }
    }
}
