mod inmemory;

pub use inmemory::InMemoryDeliveryRepo;

use klaxon_domain::{DeliveryRecord, ID};

/// Append-only audit trail of delivery attempts. There is deliberately no
/// update or delete surface.
#[async_trait::async_trait]
pub trait IDeliveryRepo: Send + Sync {
    /// Append one attempt. Failures must surface to the caller: a lost
    /// record would silently break the sequence invariant.
    async fn insert(&self, record: &DeliveryRecord) -> anyhow::Result<()>;
    /// Records for one pair in ascending `attempted_at` order
    async fn find_by_user_and_alert(&self, user_id: &ID, alert_id: &ID) -> Vec<DeliveryRecord>;
    /// Every record for one user in ascending `attempted_at` order
    async fn find_by_user(&self, user_id: &ID) -> Vec<DeliveryRecord>;
}
