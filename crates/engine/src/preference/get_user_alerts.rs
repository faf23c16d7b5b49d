use crate::error::KlaxonError;
use crate::shared::usecase::UseCase;
use klaxon_domain::{visibility, Alert, ID};
use klaxon_infra::KlaxonContext;
use serde::Serialize;

/// The feed a user sees: every active, started alert addressed to them,
/// joined with their own read and snooze state. Reading the feed never
/// creates preference rows, pairs the engine has not touched are
/// presented with their defaults.
#[derive(Debug)]
pub struct GetUserAlertsUseCase {
    pub user_id: ID,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAlert {
    pub alert: Alert,
    pub read: bool,
    pub is_snoozed: bool,
    pub snoozed_until: Option<i64>,
    pub last_reminded_at: Option<i64>,
    pub reminder_sequence: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for KlaxonError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::StorageError => Self::DataAccess("Unable to read the alerts".into()),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for GetUserAlertsUseCase {
    type Response = Vec<UserAlert>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserAlerts";

    async fn execute(&mut self, ctx: &KlaxonContext) -> Result<Self::Response, Self::Error> {
        let user = ctx
            .repos
            .users
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        let alerts = ctx
            .repos
            .alerts
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut feed = Vec::new();
        for alert in alerts {
            if !alert.is_within_window(now) || alert.archived {
                continue;
            }
            if !visibility::user_can_see(&alert.visibility, &user) {
                continue;
            }

            let preference = ctx.repos.preferences.find(&user.id, &alert.id).await;
            feed.push(match preference {
                Some(preference) => UserAlert {
                    read: preference.read,
                    is_snoozed: preference.is_snoozed(now),
                    snoozed_until: preference.snoozed_until,
                    last_reminded_at: preference.last_reminded_at,
                    reminder_sequence: preference.reminder_sequence,
                    alert,
                },
                None => UserAlert {
                    read: false,
                    is_snoozed: false,
                    snoozed_until: None,
                    last_reminded_at: None,
                    reminder_sequence: 0,
                    alert,
                },
            });
        }
        feed.sort_by_key(|entry| std::cmp::Reverse(entry.alert.created));

        Ok(feed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::preference::mark_read::MarkAlertReadUseCase;
    use klaxon_domain::{Alert, ChannelKind, Severity, User, VisibilityRule};
    use klaxon_infra::setup_context;

    async fn add_alert(ctx: &KlaxonContext, visibility: VisibilityRule, expires_at: Option<i64>) -> Alert {
        let alert = Alert {
            id: Default::default(),
            title: "Some incident".into(),
            message: "Something needs attention".into(),
            severity: Severity::Warning,
            visibility,
            channels: vec![ChannelKind::InApp],
            reminders_enabled: true,
            reminder_interval: 1000 * 60,
            start_at: 0,
            expires_at,
            archived: false,
            created_by: Default::default(),
            created: 0,
            updated: 0,
        };
        ctx.repos.alerts.insert(&alert).await.unwrap();
        alert
    }

    #[tokio::test]
    async fn lists_only_visible_active_alerts_with_preference_state() {
        let ctx = setup_context().await;
        let user = User::new("Ola Nordmann", "ola@example.com");
        ctx.repos.users.insert(&user).await.unwrap();

        let visible = add_alert(&ctx, VisibilityRule::Organization, None).await;
        add_alert(&ctx, VisibilityRule::Users(vec![ID::default()]), None).await;
        add_alert(&ctx, VisibilityRule::Organization, Some(1)).await;

        let read = add_alert(&ctx, VisibilityRule::Organization, None).await;
        let mut mark_read = MarkAlertReadUseCase {
            user_id: user.id.clone(),
            alert_id: read.id.clone(),
        };
        mark_read.execute(&ctx).await.unwrap();

        let mut usecase = GetUserAlertsUseCase {
            user_id: user.id.clone(),
        };
        let feed = usecase.execute(&ctx).await.unwrap();

        assert_eq!(feed.len(), 2);
        let visible_entry = feed.iter().find(|e| e.alert.id == visible.id).unwrap();
        assert!(!visible_entry.read);
        assert_eq!(visible_entry.reminder_sequence, 0);
        let read_entry = feed.iter().find(|e| e.alert.id == read.id).unwrap();
        assert!(read_entry.read);

        // The feed is read only, no rows were created for the untouched pair
        assert!(ctx
            .repos
            .preferences
            .find(&user.id, &visible.id)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn rejects_unknown_user() {
        let ctx = setup_context().await;

        let mut usecase = GetUserAlertsUseCase {
            user_id: Default::default(),
        };
        let res = usecase.execute(&ctx).await;

        assert!(matches!(res.unwrap_err(), UseCaseError::UserNotFound(_)));
    }
}
