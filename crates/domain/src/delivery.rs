use crate::alert::ChannelKind;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Delivered,
    Failed(String),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// One delivery attempt on one channel for one `(user, alert)` pair.
///
/// Records are append only and failures are recorded too, so the audit
/// trail answers who was notified when, on what channel, and what failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub id: ID,
    pub alert_id: ID,
    pub user_id: ID,
    pub channel: ChannelKind,
    pub attempted_at: i64,
    pub outcome: DeliveryOutcome,
    /// 1-based ordinal of the reminder pass this attempt belonged to
    pub sequence: i64,
}

impl Entity for DeliveryRecord {
    fn id(&self) -> &ID {
        &self.id
    }
}
