mod alerts;
mod deliveries;
mod inbox;
mod preferences;
mod shared;
mod teams;
mod users;

pub use alerts::{IAlertRepo, InMemoryAlertRepo};
pub use deliveries::{IDeliveryRepo, InMemoryDeliveryRepo};
pub use inbox::{IInboxRepo, InMemoryInboxRepo};
pub use preferences::{IPreferenceRepo, InMemoryPreferenceRepo};
pub use teams::{ITeamRepo, InMemoryTeamRepo};
pub use users::{IUserRepo, InMemoryUserRepo};

use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub alerts: Arc<dyn IAlertRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub teams: Arc<dyn ITeamRepo>,
    pub preferences: Arc<dyn IPreferenceRepo>,
    pub deliveries: Arc<dyn IDeliveryRepo>,
    pub inbox: Arc<dyn IInboxRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            alerts: Arc::new(InMemoryAlertRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            teams: Arc::new(InMemoryTeamRepo::new()),
            preferences: Arc::new(InMemoryPreferenceRepo::new()),
            deliveries: Arc::new(InMemoryDeliveryRepo::new()),
            inbox: Arc::new(InMemoryInboxRepo::new()),
        }
    }
}
