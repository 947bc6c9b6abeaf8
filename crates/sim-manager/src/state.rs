//! Shared application state for the request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::flash::FlashStore;
use crate::store::SimulationStore;

/// State handed to every handler.
///
/// Cloning is cheap: the config sits behind an `Arc` and the flash store
/// shares its map.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: SimulationStore,
    pub flashes: FlashStore,
}

impl AppState {
    /// Opens the store described by `config`, creating its root if needed.
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = SimulationStore::open(&config.store_root, &config.stats_templates)?;
        Ok(Self {
            config: Arc::new(config),
            store,
            flashes: FlashStore::new(),
        })
    }
}
