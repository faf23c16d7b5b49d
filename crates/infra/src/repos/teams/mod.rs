mod inmemory;

pub use inmemory::InMemoryTeamRepo;

use klaxon_domain::{Team, ID};

#[async_trait::async_trait]
pub trait ITeamRepo: Send + Sync {
    async fn insert(&self, team: &Team) -> anyhow::Result<()>;
    async fn find(&self, team_id: &ID) -> Option<Team>;
    async fn find_all(&self) -> anyhow::Result<Vec<Team>>;
}
