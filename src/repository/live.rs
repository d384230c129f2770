use futures::future::BoxFuture;
use tokio::sync::watch;

use crate::error::AppError;

type QueryFn<T> = Box<dyn Fn() -> BoxFuture<'static, Result<Vec<T>, AppError>> + Send + Sync>;

/// A continuously-updating read query. The first `next()` returns the
/// current result set; every later call waits for a commit on the backing
/// table and returns a fresh full snapshot. Snapshots arrive in commit
/// order. Dropping the handle is the only way to unsubscribe.
pub struct Live<T> {
    rx: watch::Receiver<u64>,
    query: QueryFn<T>,
    primed: bool,
}

impl<T> Live<T> {
    pub(crate) fn new(rx: watch::Receiver<u64>, query: QueryFn<T>) -> Self {
        Self {
            rx,
            query,
            primed: false,
        }
    }

    /// `None` once the change feed is gone (the owning store was dropped).
    pub async fn next(&mut self) -> Option<Result<Vec<T>, AppError>> {
        if self.primed {
            if self.rx.changed().await.is_err() {
                return None;
            }
        } else {
            self.primed = true;
            // Swallow any marker raced in before the first snapshot; the
            // query below already observes that commit.
            self.rx.borrow_and_update();
        }
        Some((self.query)().await)
    }
}
