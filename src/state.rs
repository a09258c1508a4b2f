use std::sync::Arc;

use crate::ai::HfClient;
use crate::analysis::Orchestrator;
use crate::cache::CacheService;
use crate::config::Config;
use crate::db::DbPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,
    pub hf: HfClient,
    pub cache: CacheService,
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config, hf: HfClient, cache: CacheService) -> Self {
        let orchestrator = Arc::new(Orchestrator::new(hf.clone()));
        Self {
            pool,
            config: Arc::new(config),
            hf,
            cache,
            orchestrator,
        }
    }
}
