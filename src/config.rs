/// Settings for the generated redirect rules
use serde::{Deserialize, Serialize};

/// Extension page that blocked navigations are redirected to
pub const BLOCKED_PAGE_PATH: &str = "/blocked/blocked.html";

/// Platform cap on dynamic rules that redirect (counted as "unsafe" rules)
pub const MAX_DYNAMIC_REDIRECT_RULES: usize = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockerConfig {
    pub redirect_path: String,
    pub priority: u32,
    pub max_rules: usize,
}

impl Default for BlockerConfig {
    fn default() -> Self {
        BlockerConfig {
            redirect_path: BLOCKED_PAGE_PATH.to_string(),
            priority: 1,
            max_rules: MAX_DYNAMIC_REDIRECT_RULES,
        }
    }
}
