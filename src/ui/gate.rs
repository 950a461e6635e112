/// One-at-a-time guard for popup actions
use std::cell::Cell;
use std::future::Future;

/// Store and rule-table steps of one action must finish before the next
/// action starts. Events that arrive while an action is running are dropped.
#[derive(Debug, Default)]
pub struct ActionGate {
    busy: Cell<bool>,
}

impl ActionGate {
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Run `action` unless another one is in flight. Returns `None` when refused.
    pub async fn run<F: Future>(&self, action: F) -> Option<F::Output> {
        if self.busy.replace(true) {
            log::debug!("Ignoring action while another one is running");
            return None;
        }
        let output = action.await;
        self.busy.set(false);
        Some(output)
    }
}
