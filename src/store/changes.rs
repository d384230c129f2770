use std::sync::Arc;

use tokio::sync::watch;

/// Process-wide commit counter, shared by every store so that cascade
/// deletes wake watchers of the child tables too. Every write bumps it once;
/// live queries hold a receiver and re-run their query on each bump, so
/// subscribers see every successive snapshot in commit order.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: Arc<watch::Sender<u64>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn mark(&self) {
        self.tx.send_modify(|v| *v = v.wrapping_add(1));
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
