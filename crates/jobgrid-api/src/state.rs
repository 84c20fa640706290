//! Application state.

use std::sync::Arc;

use jobgrid_query::JobQueryEngine;
use jobgrid_store::{MySqlJobStore, StoreCapabilities};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<MySqlJobStore>,
    pub engine: Arc<JobQueryEngine<MySqlJobStore>>,
}

impl AppState {
    /// Create new application state, connecting the store pool.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let capabilities = StoreCapabilities {
            application_status: config.application_status_tracking,
        };
        let store = Arc::new(
            MySqlJobStore::connect(&config.database_url, config.db_max_connections, capabilities)
                .await?,
        );
        let engine = Arc::new(JobQueryEngine::new(Arc::clone(&store)));

        Ok(Self { config, store, engine })
    }
}
