/// Popup-facing operations: startup, toggle, add and remove.
/// Rule table failures are logged here and never reach the caller.

use crate::config::BlockerConfig;
use crate::error::{SiteError, StorageError};
use crate::storage::{BlockState, BlockStore, StorageArea};
use crate::sync::{RuleSynchronizer, RuleTable};

pub struct Blocker<S, R> {
    store: BlockStore<S>,
    sync: RuleSynchronizer<R, S>,
}

impl<S: StorageArea + Clone, R: RuleTable> Blocker<S, R> {
    pub fn new(storage: S, table: R) -> Self {
        Self::with_config(storage, table, BlockerConfig::default())
    }

    pub fn with_config(storage: S, table: R, config: BlockerConfig) -> Self {
        Blocker {
            store: BlockStore::new(storage.clone()),
            sync: RuleSynchronizer::new(table, BlockStore::new(storage), config),
        }
    }

    pub async fn state(&self) -> Result<BlockState, StorageError> {
        self.store.load().await
    }

    /// Bring the rule table in line with what was persisted last time
    pub async fn initialize(&self) -> Result<BlockState, StorageError> {
        let state = self.store.load().await?;
        self.set_blocking_state(state).await
    }

    /// Flip the persisted flag and apply it
    pub async fn toggle(&self) -> Result<BlockState, StorageError> {
        let mut state = self.store.load().await?;
        state.enabled = !state.enabled;
        self.set_blocking_state(state).await
    }

    pub async fn add_site(&self, input: &str) -> Result<Vec<String>, SiteError> {
        let sites = self.store.add_site(input).await.inspect_err(|e| {
            log::warn!("Rejected site {:?}: {}", input, e);
        })?;
        if let Some(added) = sites.last() {
            log::info!("Website added: {}", added);
        }

        self.resync(&sites).await?;
        Ok(sites)
    }

    pub async fn remove_site(&self, site: &str) -> Result<Vec<String>, SiteError> {
        let sites = self.store.remove_site(site).await?;
        log::info!("Website removed: {}", site);

        self.resync(&sites).await?;
        Ok(sites)
    }

    async fn set_blocking_state(&self, state: BlockState) -> Result<BlockState, StorageError> {
        if state.enabled {
            if let Err(e) = self.sync.enable(&state.sites).await {
                log::error!("Error enabling blocking: {}", e);
            }
        } else if let Err(e) = self.sync.disable().await {
            log::error!("Error disabling blocking: {}", e);
        }

        self.store.set_enabled(state.enabled).await?;
        Ok(state)
    }

    async fn resync(&self, sites: &[String]) -> Result<(), StorageError> {
        if self.store.load().await?.enabled {
            if let Err(e) = self.sync.enable(sites).await {
                log::error!("Error enabling blocking: {}", e);
            }
        }
        Ok(())
    }
}
