/// In-memory stand-ins for chrome.storage.local and declarativeNetRequest
use crate::error::{RuleError, StorageError};
use crate::rules::{PlatformRule, RuleUpdate};
use crate::storage::StorageArea;
use crate::sync::RuleTable;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

#[derive(Default)]
struct StorageInner {
    data: Map<String, Value>,
    writes: usize,
    read_error: Option<String>,
}

/// Clones share the same backing map
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<StorageInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Value) -> Self {
        let storage = Self::new();
        if let Value::Object(map) = data {
            storage.inner.borrow_mut().data = map;
        }
        storage
    }

    pub fn fail_reads(&self, message: &str) {
        self.inner.borrow_mut().read_error = Some(message.to_string());
    }

    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes
    }

    pub fn snapshot(&self) -> Value {
        Value::Object(self.inner.borrow().data.clone())
    }
}

#[async_trait(?Send)]
impl StorageArea for MemoryStorage {
    async fn get(&self, keys: &[&str]) -> Result<Value, StorageError> {
        let inner = self.inner.borrow();
        if let Some(message) = &inner.read_error {
            return Err(StorageError::Read(message.clone()));
        }
        let found: Map<String, Value> = keys
            .iter()
            .filter_map(|key| inner.data.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect();
        Ok(Value::Object(found))
    }

    async fn set(&self, items: Value) -> Result<(), StorageError> {
        let Value::Object(items) = items else {
            return Err(StorageError::Write("items must be an object".to_string()));
        };
        let mut inner = self.inner.borrow_mut();
        inner.data.extend(items);
        inner.writes += 1;
        Ok(())
    }
}

/// Pending once, then ready: hands control back to the executor
struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// `MemoryStorage` that suspends before every get and set, the way the
/// real callback-based storage does, so interleavings can be exercised
#[derive(Clone, Default)]
pub struct YieldingStorage {
    inner: MemoryStorage,
}

impl YieldingStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl StorageArea for YieldingStorage {
    async fn get(&self, keys: &[&str]) -> Result<Value, StorageError> {
        YieldNow(false).await;
        self.inner.get(keys).await
    }

    async fn set(&self, items: Value) -> Result<(), StorageError> {
        YieldNow(false).await;
        self.inner.set(items).await
    }
}

#[derive(Default)]
struct RuleTableInner {
    rules: Vec<PlatformRule>,
    updates: Vec<RuleUpdate>,
    read_error: Option<String>,
    fail_update_at: Option<(usize, String)>,
}

/// Rule table that behaves like the platform: removals first, then additions,
/// rejecting the whole update when an added id is already taken.
#[derive(Clone, Default)]
pub struct MemoryRuleTable {
    inner: Rc<RefCell<RuleTableInner>>,
}

impl MemoryRuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<PlatformRule>) -> Self {
        let table = Self::new();
        table.inner.borrow_mut().rules = rules;
        table
    }

    pub fn rules(&self) -> Vec<PlatformRule> {
        self.inner.borrow().rules.clone()
    }

    pub fn rule_ids(&self) -> Vec<u32> {
        self.inner.borrow().rules.iter().map(|r| r.id).collect()
    }

    /// Every update call received, including rejected ones
    pub fn updates(&self) -> Vec<RuleUpdate> {
        self.inner.borrow().updates.clone()
    }

    pub fn fail_reads(&self, message: &str) {
        self.inner.borrow_mut().read_error = Some(message.to_string());
    }

    /// Reject the update call with the given zero-based index
    pub fn fail_update(&self, call: usize, message: &str) {
        self.inner.borrow_mut().fail_update_at = Some((call, message.to_string()));
    }
}

#[async_trait(?Send)]
impl RuleTable for MemoryRuleTable {
    async fn get_dynamic_rules(&self) -> Result<Vec<PlatformRule>, RuleError> {
        let inner = self.inner.borrow();
        match &inner.read_error {
            Some(message) => Err(RuleError::Read(message.clone())),
            None => Ok(inner.rules.clone()),
        }
    }

    async fn update_dynamic_rules(&self, update: RuleUpdate) -> Result<(), RuleError> {
        let mut inner = self.inner.borrow_mut();
        let call = inner.updates.len();
        inner.updates.push(update.clone());

        if let Some((index, message)) = &inner.fail_update_at {
            if *index == call {
                return Err(RuleError::Update(message.clone()));
            }
        }

        let remove: HashSet<u32> = update.remove_rule_ids.iter().copied().collect();
        let mut rules: Vec<PlatformRule> = inner
            .rules
            .iter()
            .filter(|r| !remove.contains(&r.id))
            .cloned()
            .collect();

        let mut ids: HashSet<u32> = rules.iter().map(|r| r.id).collect();
        for rule in update.add_rules {
            if !ids.insert(rule.id) {
                return Err(RuleError::Update(format!("Rule with id {} does not have a unique ID.", rule.id)));
            }
            rules.push(rule);
        }

        inner.rules = rules;
        Ok(())
    }
}
