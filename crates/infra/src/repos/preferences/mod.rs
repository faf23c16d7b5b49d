mod inmemory;

pub use inmemory::InMemoryPreferenceRepo;

use klaxon_domain::{AlertPreference, ID};

#[async_trait::async_trait]
pub trait IPreferenceRepo: Send + Sync {
    /// Find the preference for a pair, creating the default row if the
    /// pair has never been touched. Must be atomic in the store: two
    /// concurrent calls for the same pair observe a single row.
    async fn get_or_create(&self, user_id: &ID, alert_id: &ID)
        -> anyhow::Result<AlertPreference>;
    async fn find(&self, user_id: &ID, alert_id: &ID) -> Option<AlertPreference>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<AlertPreference>;
    async fn save(&self, preference: &AlertPreference) -> anyhow::Result<()>;
}
