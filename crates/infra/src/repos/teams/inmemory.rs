use super::ITeamRepo;
use crate::repos::shared::inmemory_repo::*;
use klaxon_domain::{Team, ID};
use std::sync::Mutex;

pub struct InMemoryTeamRepo {
    teams: Mutex<Vec<Team>>,
}

impl InMemoryTeamRepo {
    pub fn new() -> Self {
        Self {
            teams: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITeamRepo for InMemoryTeamRepo {
    async fn insert(&self, team: &Team) -> anyhow::Result<()> {
        insert(team, &self.teams);
        Ok(())
    }

    async fn find(&self, team_id: &ID) -> Option<Team> {
        find(team_id, &self.teams)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Team>> {
        Ok(find_all(&self.teams))
    }
}
