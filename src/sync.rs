/// Keeps the platform's dynamic rule table in line with the block list

use crate::config::BlockerConfig;
use crate::error::RuleError;
use crate::rules::{PlatformRule, RuleUpdate, build_rules};
use crate::storage::{BlockStore, StorageArea};
use async_trait::async_trait;

/// The platform's dynamic rule API (`chrome.declarativeNetRequest`)
#[async_trait(?Send)]
pub trait RuleTable {
    async fn get_dynamic_rules(&self) -> Result<Vec<PlatformRule>, RuleError>;

    async fn update_dynamic_rules(&self, update: RuleUpdate) -> Result<(), RuleError>;
}

/// Rebuilds the rule table from scratch on every call. The table is always
/// read before it is modified, never patched from remembered state.
pub struct RuleSynchronizer<R, S> {
    table: R,
    store: BlockStore<S>,
    config: BlockerConfig,
}

impl<R: RuleTable, S: StorageArea> RuleSynchronizer<R, S> {
    pub fn new(table: R, store: BlockStore<S>, config: BlockerConfig) -> Self {
        RuleSynchronizer { table, store, config }
    }

    async fn clear(&self) -> Result<(), RuleError> {
        let existing: Vec<u32> = self
            .table
            .get_dynamic_rules()
            .await?
            .iter()
            .map(|rule| rule.id)
            .collect();

        let removal = RuleUpdate::remove(existing);
        if !removal.is_empty() {
            self.table.update_dynamic_rules(removal).await?;
        }
        Ok(())
    }

    /// Replace whatever is installed with one redirect rule per site
    ///
    /// Returns the installed rule ids, which are also persisted.
    pub async fn enable(&self, sites: &[String]) -> Result<Vec<u32>, RuleError> {
        let rules = build_rules(sites, &self.config);
        if rules.len() > self.config.max_rules {
            return Err(RuleError::QuotaExceeded {
                requested: rules.len(),
                limit: self.config.max_rules,
            });
        }

        self.clear().await?;

        let ids: Vec<u32> = rules.iter().map(|rule| rule.id).collect();
        let install = RuleUpdate::add(rules);
        if !install.is_empty() {
            self.table.update_dynamic_rules(install).await?;
        }
        log::info!("Blocking enabled for websites: {:?}", sites);

        self.store.save_rule_ids(&ids).await?;
        log::debug!("Rule IDs saved: {:?}", ids);
        Ok(ids)
    }

    /// Remove every installed rule
    pub async fn disable(&self) -> Result<(), RuleError> {
        self.clear().await?;
        log::info!("Blocking disabled. All rules removed.");
        Ok(())
    }
}
