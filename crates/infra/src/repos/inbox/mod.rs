mod inmemory;

pub use inmemory::InMemoryInboxRepo;

use klaxon_domain::{InboxNotification, ID};

/// The in-app inbox the `InApp` channel delivers into
#[async_trait::async_trait]
pub trait IInboxRepo: Send + Sync {
    async fn insert(&self, notification: &InboxNotification) -> anyhow::Result<()>;
    /// A user's notifications, newest first
    async fn find_by_user(&self, user_id: &ID) -> Vec<InboxNotification>;
}
