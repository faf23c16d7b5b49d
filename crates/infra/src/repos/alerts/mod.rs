mod inmemory;

pub use inmemory::InMemoryAlertRepo;

use klaxon_domain::{Alert, ID};

#[async_trait::async_trait]
pub trait IAlertRepo: Send + Sync {
    async fn insert(&self, alert: &Alert) -> anyhow::Result<()>;
    async fn save(&self, alert: &Alert) -> anyhow::Result<()>;
    async fn find(&self, alert_id: &ID) -> Option<Alert>;
    /// Every alert, the scan set for a reminder tick. An `Err` here is
    /// the only failure that aborts a whole tick.
    async fn find_all(&self) -> anyhow::Result<Vec<Alert>>;
}
