use super::IAlertRepo;
use crate::repos::shared::inmemory_repo::*;
use klaxon_domain::{Alert, ID};
use std::sync::Mutex;

pub struct InMemoryAlertRepo {
    alerts: Mutex<Vec<Alert>>,
}

impl InMemoryAlertRepo {
    pub fn new() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAlertRepo for InMemoryAlertRepo {
    async fn insert(&self, alert: &Alert) -> anyhow::Result<()> {
        insert(alert, &self.alerts);
        Ok(())
    }

    async fn save(&self, alert: &Alert) -> anyhow::Result<()> {
        save(alert, &self.alerts);
        Ok(())
    }

    async fn find(&self, alert_id: &ID) -> Option<Alert> {
        find(alert_id, &self.alerts)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Alert>> {
        Ok(find_all(&self.alerts))
    }
}
