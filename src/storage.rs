/// Persisted block-list state on top of an injected key/value storage area

use crate::error::{SiteError, StorageError};
use crate::hostname::{is_valid, site_hostname};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const KEY_BLOCKING_ENABLED: &str = "blockingEnabled";
pub const KEY_BLOCKED_SITES: &str = "blockedSites";
pub const KEY_RULE_IDS: &str = "ruleIds";

/// Key/value storage in the shape of `chrome.storage.local`
#[async_trait(?Send)]
pub trait StorageArea {
    /// Returns an object holding whichever of `keys` are present
    async fn get(&self, keys: &[&str]) -> Result<Value, StorageError>;

    /// Writes every entry of the `items` object in one call
    async fn set(&self, items: Value) -> Result<(), StorageError>;
}

/// Raw stored record; every key may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocking_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_sites: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_ids: Option<Vec<u32>>,
}

/// Block list and flag with first-run defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockState {
    pub enabled: bool,
    pub sites: Vec<String>,
}

impl Default for BlockState {
    fn default() -> Self {
        BlockState {
            enabled: true,
            sites: Vec::new(),
        }
    }
}

impl From<StoredState> for BlockState {
    fn from(stored: StoredState) -> Self {
        BlockState {
            enabled: stored.blocking_enabled.unwrap_or(true),
            sites: stored.blocked_sites.unwrap_or_default(),
        }
    }
}

pub struct BlockStore<S> {
    area: S,
}

impl<S: StorageArea> BlockStore<S> {
    pub fn new(area: S) -> Self {
        BlockStore { area }
    }

    async fn read(&self, keys: &[&str]) -> Result<StoredState, StorageError> {
        let value = self.area.get(keys).await?;
        if value.is_null() {
            return Ok(StoredState::default());
        }
        serde_json::from_value(value).map_err(|e| StorageError::Decode(e.to_string()))
    }

    async fn write(&self, state: &StoredState) -> Result<(), StorageError> {
        let items = serde_json::to_value(state).map_err(|e| StorageError::Write(e.to_string()))?;
        self.area.set(items).await
    }

    /// Current flag and list. Missing keys are not an error.
    pub async fn load(&self) -> Result<BlockState, StorageError> {
        self.read(&[KEY_BLOCKING_ENABLED, KEY_BLOCKED_SITES])
            .await
            .map(BlockState::from)
    }

    /// Overwrite flag and list together
    pub async fn save(&self, enabled: bool, sites: &[String]) -> Result<(), StorageError> {
        self.write(&StoredState {
            blocking_enabled: Some(enabled),
            blocked_sites: Some(sites.to_vec()),
            rule_ids: None,
        })
        .await
    }

    pub async fn set_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        self.write(&StoredState {
            blocking_enabled: Some(enabled),
            ..StoredState::default()
        })
        .await
    }

    async fn save_sites(&self, sites: &[String]) -> Result<(), StorageError> {
        self.write(&StoredState {
            blocked_sites: Some(sites.to_vec()),
            ..StoredState::default()
        })
        .await
    }

    /// Validate, normalize and append a site
    ///
    /// The stored entry is the bare hostname, so `https://Example.com/` and
    /// `example.com` count as the same site.
    pub async fn add_site(&self, input: &str) -> Result<Vec<String>, SiteError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SiteError::EmptyInput);
        }

        let hostname = if is_valid(input) { site_hostname(input) } else { None };
        let Some(hostname) = hostname else {
            return Err(SiteError::InvalidHostname(input.to_string()));
        };

        let mut sites = self.load().await?.sites;
        let exists = sites
            .iter()
            .any(|site| *site == hostname || site_hostname(site).as_deref() == Some(hostname.as_str()));
        if exists {
            return Err(SiteError::AlreadyExists(hostname));
        }

        sites.push(hostname);
        self.save_sites(&sites).await?;
        Ok(sites)
    }

    /// Remove a site; removing an absent site leaves storage untouched
    pub async fn remove_site(&self, site: &str) -> Result<Vec<String>, StorageError> {
        let mut sites = self.load().await?.sites;
        let original_len = sites.len();
        sites.retain(|s| s != site);

        if sites.len() < original_len {
            self.save_sites(&sites).await?;
        }
        Ok(sites)
    }

    pub async fn save_rule_ids(&self, ids: &[u32]) -> Result<(), StorageError> {
        self.write(&StoredState {
            rule_ids: Some(ids.to_vec()),
            ..StoredState::default()
        })
        .await
    }

    pub async fn load_rule_ids(&self) -> Result<Vec<u32>, StorageError> {
        Ok(self.read(&[KEY_RULE_IDS]).await?.rule_ids.unwrap_or_default())
    }
}
