/// Dynamic redirect rules, shaped the way the declarativeNetRequest API expects them
use crate::config::BlockerConfig;
use crate::hostname::site_hostname;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRule {
    pub id: u32,
    #[serde(default = "default_priority")]
    pub priority: u32,
    pub action: RuleAction,
    pub condition: RuleCondition,
}

fn default_priority() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub kind: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    Block,
    Redirect,
    Allow,
    UpgradeScheme,
    ModifyHeaders,
    AllowAllRequests,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_types: Vec<ResourceType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    MainFrame,
    SubFrame,
    Stylesheet,
    Script,
    Image,
    Font,
    Object,
    Xmlhttprequest,
    Ping,
    CspReport,
    Media,
    Websocket,
    Webtransport,
    Webbundle,
    #[serde(other)]
    Other,
}

/// Argument to `updateDynamicRules`. Removals are applied before additions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleUpdate {
    pub add_rules: Vec<PlatformRule>,
    pub remove_rule_ids: Vec<u32>,
}

impl RuleUpdate {
    pub fn remove(ids: Vec<u32>) -> Self {
        RuleUpdate {
            add_rules: Vec::new(),
            remove_rule_ids: ids,
        }
    }

    pub fn add(rules: Vec<PlatformRule>) -> Self {
        RuleUpdate {
            add_rules: rules,
            remove_rule_ids: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.add_rules.is_empty() && self.remove_rule_ids.is_empty()
    }
}

impl PlatformRule {
    /// Main-frame redirect rule for a single hostname
    pub fn redirect(id: u32, hostname: &str, config: &BlockerConfig) -> PlatformRule {
        PlatformRule {
            id,
            priority: config.priority,
            action: RuleAction {
                kind: ActionType::Redirect,
                redirect: Some(Redirect {
                    extension_path: Some(config.redirect_path.clone()),
                    url: None,
                }),
            },
            condition: RuleCondition {
                url_filter: Some(format!("||{}^", hostname)),
                resource_types: vec![ResourceType::MainFrame],
            },
        }
    }
}

/// Derive the full rule set for a block list
///
/// Rule ids are 1-based list positions, so they shift whenever an earlier entry
/// is removed. Entries whose hostname cannot be extracted are skipped and their
/// id is left unused.
pub fn build_rules(sites: &[String], config: &BlockerConfig) -> Vec<PlatformRule> {
    sites
        .iter()
        .enumerate()
        .filter_map(|(index, site)| match site_hostname(site) {
            Some(hostname) => Some(PlatformRule::redirect(index as u32 + 1, &hostname, config)),
            None => {
                log::warn!("Skipping block-list entry with no hostname: {:?}", site);
                None
            }
        })
        .collect()
}
