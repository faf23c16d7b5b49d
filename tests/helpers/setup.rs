use klaxon_domain::{Team, User, ID};
use klaxon_infra::{setup_context, FixedTimeSys, KlaxonContext};
use std::sync::Arc;

pub struct TestApp {
    pub ctx: KlaxonContext,
    pub sys: Arc<FixedTimeSys>,
}

/// The engine wired like production, but on a controllable clock.
pub async fn spawn_app(start: i64) -> TestApp {
    let mut ctx = setup_context().await;
    let sys = Arc::new(FixedTimeSys::new(start));
    ctx.sys = sys.clone();

    TestApp { ctx, sys }
}

impl TestApp {
    pub async fn add_admin(&self, name: &str) -> User {
        let mut admin = User::new(name, &format!("{}@example.com", name));
        admin.is_admin = true;
        self.ctx.repos.users.insert(&admin).await.unwrap();
        admin
    }

    pub async fn add_member(&self, name: &str, team_id: Option<ID>) -> User {
        let mut user = User::new(name, &format!("{}@example.com", name));
        user.team_id = team_id;
        self.ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    pub async fn add_team(&self, name: &str) -> Team {
        let team = Team::new(name);
        self.ctx.repos.teams.insert(&team).await.unwrap();
        team
    }
}
