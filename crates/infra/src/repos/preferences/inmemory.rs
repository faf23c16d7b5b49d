use super::IPreferenceRepo;
use crate::repos::shared::inmemory_repo::*;
use klaxon_domain::{AlertPreference, ID};
use std::sync::Mutex;

pub struct InMemoryPreferenceRepo {
    preferences: Mutex<Vec<AlertPreference>>,
}

impl InMemoryPreferenceRepo {
    pub fn new() -> Self {
        Self {
            preferences: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPreferenceRepo for InMemoryPreferenceRepo {
    async fn get_or_create(
        &self,
        user_id: &ID,
        alert_id: &ID,
    ) -> anyhow::Result<AlertPreference> {
        // The collection lock is held across lookup and insert so two
        // concurrent calls cannot both create the pair
        let mut preferences = self.preferences.lock().unwrap();
        if let Some(preference) = preferences
            .iter()
            .find(|p| &p.user_id == user_id && &p.alert_id == alert_id)
        {
            return Ok(preference.clone());
        }

        let preference = AlertPreference::new(user_id.clone(), alert_id.clone());
        preferences.push(preference.clone());
        Ok(preference)
    }

    async fn find(&self, user_id: &ID, alert_id: &ID) -> Option<AlertPreference> {
        find_by(&self.preferences, |p| {
            &p.user_id == user_id && &p.alert_id == alert_id
        })
        .into_iter()
        .next()
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<AlertPreference> {
        find_by(&self.preferences, |p| &p.user_id == user_id)
    }

    async fn save(&self, preference: &AlertPreference) -> anyhow::Result<()> {
        save(preference, &self.preferences);
        Ok(())
    }
}
