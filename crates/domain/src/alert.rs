use crate::notification::RenderedMessage;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Default gap between reminder passes for a single user, in millis
pub const DEFAULT_REMINDER_INTERVAL: i64 = 1000 * 60 * 60 * 2; // 2 hours

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    /// Uppercase tag used when rendering messages for delivery
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// Who an `Alert` is addressed to.
///
/// Immutable once the alert is created. Audiences are recomputed from the
/// current membership snapshot on every evaluation, so team changes take
/// effect without any stored subscription list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "lowercase")]
pub enum VisibilityRule {
    /// Everyone in the organization
    Organization,
    /// Every user currently on the given team
    Team(ID),
    /// An explicit set of users
    Users(Vec<ID>),
}

/// The closed set of delivery channels. Adding a channel means adding a
/// variant here and teaching the channel dispatcher about it, nothing is
/// registered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    InApp,
    Email,
    Sms,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InApp => "in_app",
            Self::Email => "email",
            Self::Sms => "sms",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle of an `Alert`, derived from its stored fields. Expiry is
/// automatic and archival is an explicit admin action; archival wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Active,
    Expired,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: ID,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub visibility: VisibilityRule,
    /// Channels a reminder pass attempts, in order
    pub channels: Vec<ChannelKind>,
    pub reminders_enabled: bool,
    /// Minimum gap between reminder passes for a single user, in millis
    pub reminder_interval: i64,
    /// When delivery may begin
    pub start_at: i64,
    /// When delivery ends. `None` means the alert never expires on its own
    pub expires_at: Option<i64>,
    pub archived: bool,
    pub created_by: ID,
    pub created: i64,
    pub updated: i64,
}

impl Alert {
    pub fn lifecycle_state(&self, now: i64) -> LifecycleState {
        if self.archived {
            LifecycleState::Archived
        } else if matches!(self.expires_at, Some(expires_at) if expires_at <= now) {
            LifecycleState::Expired
        } else {
            LifecycleState::Active
        }
    }

    /// Whether `now` is inside the `[start_at, expires_at)` delivery window
    pub fn is_within_window(&self, now: i64) -> bool {
        self.start_at <= now && self.expires_at.map(|e| now < e).unwrap_or(true)
    }

    /// Whether the reminder engine should consider this alert at all
    pub fn is_reminder_eligible(&self, now: i64) -> bool {
        self.lifecycle_state(now) == LifecycleState::Active
            && self.reminders_enabled
            && self.is_within_window(now)
    }

    pub fn has_valid_window(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at > self.start_at,
            None => true,
        }
    }

    /// The message as handed to delivery channels. `sequence` is the
    /// 1-based ordinal of the reminder pass for the receiving user.
    pub fn render_message(&self, sequence: i64) -> RenderedMessage {
        let subject = format!("[{}] {}", self.severity.label(), self.title);
        let body = if sequence > 1 {
            format!("{} (reminder #{})", self.message, sequence)
        } else {
            self.message.clone()
        };
        RenderedMessage { subject, body }
    }
}

impl Entity for Alert {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_alert() -> Alert {
        Alert {
            id: Default::default(),
            title: "Database failover".into(),
            message: "Primary is down, writes are frozen".into(),
            severity: Severity::Critical,
            visibility: VisibilityRule::Organization,
            channels: vec![ChannelKind::InApp],
            reminders_enabled: true,
            reminder_interval: DEFAULT_REMINDER_INTERVAL,
            start_at: 1000,
            expires_at: Some(10_000),
            archived: false,
            created_by: Default::default(),
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn lifecycle_is_derived_from_expiry_and_archive_flag() {
        let mut alert = test_alert();
        assert_eq!(alert.lifecycle_state(5000), LifecycleState::Active);
        assert_eq!(alert.lifecycle_state(10_000), LifecycleState::Expired);
        assert_eq!(alert.lifecycle_state(20_000), LifecycleState::Expired);

        alert.archived = true;
        assert_eq!(alert.lifecycle_state(5000), LifecycleState::Archived);
        // Archival wins over expiry
        assert_eq!(alert.lifecycle_state(20_000), LifecycleState::Archived);
    }

    #[test]
    fn alert_without_expiry_stays_active() {
        let mut alert = test_alert();
        alert.expires_at = None;
        assert_eq!(
            alert.lifecycle_state(i64::max_value()),
            LifecycleState::Active
        );
    }

    #[test]
    fn delivery_window_is_start_inclusive_expiry_exclusive() {
        let alert = test_alert();
        assert!(!alert.is_within_window(999));
        assert!(alert.is_within_window(1000));
        assert!(alert.is_within_window(9999));
        assert!(!alert.is_within_window(10_000));
    }

    #[test]
    fn eligibility_requires_enabled_reminders() {
        let mut alert = test_alert();
        assert!(alert.is_reminder_eligible(5000));
        alert.reminders_enabled = false;
        assert!(!alert.is_reminder_eligible(5000));
    }

    #[test]
    fn not_eligible_before_start_or_after_expiry() {
        let alert = test_alert();
        assert!(!alert.is_reminder_eligible(500));
        assert!(!alert.is_reminder_eligible(10_001));
    }

    #[test]
    fn window_validation() {
        let mut alert = test_alert();
        assert!(alert.has_valid_window());
        alert.expires_at = Some(alert.start_at);
        assert!(!alert.has_valid_window());
        alert.expires_at = None;
        assert!(alert.has_valid_window());
    }

    #[test]
    fn renders_severity_and_reminder_ordinal() {
        let alert = test_alert();
        let first = alert.render_message(1);
        assert_eq!(first.subject, "[CRITICAL] Database failover");
        assert_eq!(first.body, "Primary is down, writes are frozen");

        let third = alert.render_message(3);
        assert_eq!(
            third.body,
            "Primary is down, writes are frozen (reminder #3)"
        );
    }
}
