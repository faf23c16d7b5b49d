use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Per `(user, alert)` notification state.
///
/// Created lazily the first time the pair is touched and kept for the
/// lifetime of the `Alert`, so reads never invent state and archived
/// alerts keep their history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPreference {
    pub id: ID,
    pub alert_id: ID,
    pub user_id: ID,
    /// A read alert is never reminded again unless the user marks it unread
    pub read: bool,
    /// Suppresses reminders through this timestamp. The snooze lapses
    /// lazily, there is no unsnooze transition.
    pub snoozed_until: Option<i64>,
    /// When the last reminder pass with at least one delivered channel ran
    pub last_reminded_at: Option<i64>,
    /// Number of reminder passes that reached the user on at least one
    /// channel. Delivery records carry the pass ordinal in `sequence`.
    pub reminder_sequence: i64,
}

impl AlertPreference {
    pub fn new(user_id: ID, alert_id: ID) -> Self {
        Self {
            id: Default::default(),
            alert_id,
            user_id,
            read: false,
            snoozed_until: None,
            last_reminded_at: None,
            reminder_sequence: 0,
        }
    }

    pub fn is_snoozed(&self, now: i64) -> bool {
        matches!(self.snoozed_until, Some(until) if now <= until)
    }

    /// Whether enough time has passed since the last delivered pass for
    /// another reminder. A pair that has never been reminded is always due.
    pub fn is_due(&self, now: i64, interval: i64) -> bool {
        match self.last_reminded_at {
            Some(last) => now - last >= interval,
            None => true,
        }
    }
}

impl Entity for AlertPreference {
    fn id(&self) -> &ID {
        &self.id
    }
}
