/// chrome.storage.local and chrome.declarativeNetRequest, reached through popup.js

use crate::error::{RuleError, StorageError};
use crate::rules::{PlatformRule, RuleUpdate};
use crate::storage::StorageArea;
use crate::sync::RuleTable;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(items: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getDynamicRules() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn updateDynamicRules(options: JsValue) -> Result<(), JsValue>;
}

fn js_message(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Failed to serialize: {:?}", e))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeStorage;

#[async_trait(?Send)]
impl StorageArea for ChromeStorage {
    async fn get(&self, keys: &[&str]) -> Result<Value, StorageError> {
        let keys_js = to_js(&keys).map_err(StorageError::Read)?;
        let items = getStorage(keys_js)
            .await
            .map_err(|e| StorageError::Read(js_message(e)))?;

        if items.is_null() || items.is_undefined() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(items).map_err(|e| StorageError::Decode(format!("{:?}", e)))
    }

    async fn set(&self, items: Value) -> Result<(), StorageError> {
        let items_js = to_js(&items).map_err(StorageError::Write)?;
        setStorage(items_js)
            .await
            .map_err(|e| StorageError::Write(js_message(e)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeRules;

#[async_trait(?Send)]
impl RuleTable for ChromeRules {
    async fn get_dynamic_rules(&self) -> Result<Vec<PlatformRule>, RuleError> {
        let rules_js = getDynamicRules()
            .await
            .map_err(|e| RuleError::Read(js_message(e)))?;

        serde_wasm_bindgen::from_value(rules_js)
            .map_err(|e| RuleError::Read(format!("Failed to parse rules: {:?}", e)))
    }

    async fn update_dynamic_rules(&self, update: RuleUpdate) -> Result<(), RuleError> {
        let update_js = to_js(&update).map_err(RuleError::Update)?;
        updateDynamicRules(update_js)
            .await
            .map_err(|e| RuleError::Update(js_message(e)))
    }
}
