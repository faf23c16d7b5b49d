use super::IInboxRepo;
use crate::repos::shared::inmemory_repo::*;
use klaxon_domain::{InboxNotification, ID};
use std::sync::Mutex;

pub struct InMemoryInboxRepo {
    notifications: Mutex<Vec<InboxNotification>>,
}

impl InMemoryInboxRepo {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IInboxRepo for InMemoryInboxRepo {
    async fn insert(&self, notification: &InboxNotification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<InboxNotification> {
        let mut notifications = find_by(&self.notifications, |n| &n.user_id == user_id);
        notifications.sort_by_key(|n| std::cmp::Reverse(n.delivered_at));
        notifications
    }
}
