use klaxon_domain::ID;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

/// Registry of per `(user, alert)` async locks.
///
/// Every mutation of an `AlertPreference` happens behind the pair's lock,
/// which serializes the engine's check-deliver-record-advance sequence
/// with user actions on the same pair. Distinct pairs never contend and
/// there is no global lock.
#[derive(Clone)]
pub struct PreferenceLocks {
    locks: Arc<Mutex<HashMap<(ID, ID), Arc<AsyncMutex<()>>>>>,
}

impl PreferenceLocks {
    pub fn new() -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Acquire the lock for one pair, waiting while the engine or another
    /// user action holds it
    pub async fn lock(&self, user_id: &ID, alert_id: &ID) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap();
            locks
                .entry((user_id.clone(), alert_id.clone()))
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Drops registry entries whose lock is neither held nor awaited.
    /// Pairs go idle as their alerts retire; call sweep() periodically
    /// to clear them out. A swept pair gets a fresh entry next time.
    pub fn sweep(&self) {
        let mut locks = self.locks.lock().unwrap();
        let before = locks.len();
        // A holder or waiter owns a clone of the Arc, so a count of
        // one means the registry holds the only handle
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        let dropped = before - locks.len();
        if dropped > 0 {
            debug!("Dropped {} idle preference locks", dropped);
        }
    }
}

impl Default for PreferenceLocks {
    fn default() -> Self {
        Self::new()
    }
}
