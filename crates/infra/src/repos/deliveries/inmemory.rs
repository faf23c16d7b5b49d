use super::IDeliveryRepo;
use crate::repos::shared::inmemory_repo::*;
use klaxon_domain::{DeliveryRecord, ID};
use std::sync::Mutex;

pub struct InMemoryDeliveryRepo {
    records: Mutex<Vec<DeliveryRecord>>,
}

impl InMemoryDeliveryRepo {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDeliveryRepo for InMemoryDeliveryRepo {
    async fn insert(&self, record: &DeliveryRecord) -> anyhow::Result<()> {
        insert(record, &self.records);
        Ok(())
    }

    async fn find_by_user_and_alert(&self, user_id: &ID, alert_id: &ID) -> Vec<DeliveryRecord> {
        let mut records = find_by(&self.records, |r| {
            &r.user_id == user_id && &r.alert_id == alert_id
        });
        records.sort_by_key(|r| r.attempted_at);
        records
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<DeliveryRecord> {
        let mut records = find_by(&self.records, |r| &r.user_id == user_id);
        records.sort_by_key(|r| r.attempted_at);
        records
    }
}
