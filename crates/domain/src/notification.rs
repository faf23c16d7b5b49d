use crate::alert::Severity;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// An alert message rendered for handoff to a delivery channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

/// What the in-app channel writes: one inbox row per delivered reminder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxNotification {
    pub id: ID,
    pub user_id: ID,
    pub alert_id: ID,
    pub severity: Severity,
    pub subject: String,
    pub body: String,
    pub sequence: i64,
    pub delivered_at: i64,
}

impl Entity for InboxNotification {
    fn id(&self) -> &ID {
        &self.id
    }
}
