mod inmemory;

pub use inmemory::InMemoryUserRepo;

use klaxon_domain::{User, ID};

/// Read side of the membership directory. The engine only ever takes
/// snapshots through `find_all`; the write methods exist for seeding and
/// for mirroring directory changes in.
#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;
}
