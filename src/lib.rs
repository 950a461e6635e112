/// Site Blocker - Chrome Extension that redirects blocked sites
/// Built with Rust + WASM + Yew

mod blocker;
mod chrome;
mod config;
mod error;
mod hostname;
mod rules;
mod storage;
mod sync;
pub mod ui;

#[cfg(test)]
mod testing;

pub use blocker::Blocker;
pub use chrome::{ChromeRules, ChromeStorage};
pub use config::BlockerConfig;
pub use error::{RuleError, SiteError, StorageError};
pub use rules::{ActionType, PlatformRule, Redirect, ResourceType, RuleAction, RuleCondition, RuleUpdate};
pub use storage::{BlockState, BlockStore, StorageArea};
pub use sync::{RuleSynchronizer, RuleTable};

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export validation for JavaScript access
#[wasm_bindgen]
pub fn is_valid_site(input: &str) -> bool {
    hostname::is_valid(input)
}

#[wasm_bindgen]
pub fn site_hostname(site: &str) -> String {
    hostname::site_hostname(site).unwrap_or_else(|| "invalid".to_string())
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the Yew app for the redirect target page
#[wasm_bindgen]
pub fn start_blocked_page() {
    yew::Renderer::<ui::blocked::BlockedPage>::new().render();
}
