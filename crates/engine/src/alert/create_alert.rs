use super::subscribers::NotifyAudienceOnAlertCreated;
use crate::error::KlaxonError;
use crate::shared::usecase::{Subscriber, UseCase};
use klaxon_domain::{Alert, ChannelKind, Severity, VisibilityRule, ID, DEFAULT_REMINDER_INTERVAL};
use klaxon_infra::KlaxonContext;

/// Publishes a new alert. The creator must be an admin. The visibility
/// rule and the start of the delivery window are fixed for the alert's
/// lifetime, everything else can be updated later.
#[derive(Debug)]
pub struct CreateAlertUseCase {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub visibility: VisibilityRule,
    /// Defaults to in-app only
    pub channels: Option<Vec<ChannelKind>>,
    /// Defaults to now
    pub start_at: Option<i64>,
    pub expires_at: Option<i64>,
    /// Defaults to two hours
    pub reminder_interval: Option<i64>,
    /// Defaults to enabled
    pub reminders_enabled: Option<bool>,
    pub created_by: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    CreatorNotFound(ID),
    NotAdmin,
    EmptyTitle,
    EmptyMessage,
    NoChannels,
    InvalidReminderInterval,
    InvalidWindow,
    TeamNotFound(ID),
    EmptyUserAudience,
    StorageError,
}

impl From<UseCaseError> for KlaxonError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::CreatorNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::NotAdmin => {
                Self::BadClientData("Only admins are allowed to publish alerts".into())
            }
            UseCaseError::EmptyTitle => Self::BadClientData("Alert title cannot be empty".into()),
            UseCaseError::EmptyMessage => {
                Self::BadClientData("Alert message cannot be empty".into())
            }
            UseCaseError::NoChannels => {
                Self::BadClientData("An alert needs at least one delivery channel".into())
            }
            UseCaseError::InvalidReminderInterval => {
                Self::BadClientData("The reminder interval must be greater than zero".into())
            }
            UseCaseError::InvalidWindow => {
                Self::BadClientData("The expiry must be after the start of the alert".into())
            }
            UseCaseError::TeamNotFound(team_id) => {
                Self::NotFound(format!("The team with id: {}, was not found.", team_id))
            }
            UseCaseError::EmptyUserAudience => {
                Self::BadClientData("A user visibility rule needs at least one user".into())
            }
            UseCaseError::StorageError => Self::DataAccess("Unable to store the alert".into()),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for CreateAlertUseCase {
    type Response = Alert;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateAlert";

    async fn execute(&mut self, ctx: &KlaxonContext) -> Result<Self::Response, Self::Error> {
        let creator = ctx
            .repos
            .users
            .find(&self.created_by)
            .await
            .ok_or_else(|| UseCaseError::CreatorNotFound(self.created_by.clone()))?;
        if !creator.is_admin {
            return Err(UseCaseError::NotAdmin);
        }

        if self.title.trim().is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }
        if self.message.trim().is_empty() {
            return Err(UseCaseError::EmptyMessage);
        }

        let channels = self
            .channels
            .clone()
            .unwrap_or_else(|| vec![ChannelKind::InApp]);
        if channels.is_empty() {
            return Err(UseCaseError::NoChannels);
        }

        let reminder_interval = self.reminder_interval.unwrap_or(DEFAULT_REMINDER_INTERVAL);
        if reminder_interval <= 0 {
            return Err(UseCaseError::InvalidReminderInterval);
        }

        // Unknown users in a user rule are fine, membership churns. An
        // empty rule or an unknown team is a caller mistake.
        match &self.visibility {
            VisibilityRule::Team(team_id) => {
                if ctx.repos.teams.find(team_id).await.is_none() {
                    return Err(UseCaseError::TeamNotFound(team_id.clone()));
                }
            }
            VisibilityRule::Users(user_ids) if user_ids.is_empty() => {
                return Err(UseCaseError::EmptyUserAudience);
            }
            _ => {}
        }

        let now = ctx.sys.get_timestamp_millis();
        let alert = Alert {
            id: Default::default(),
            title: self.title.clone(),
            message: self.message.clone(),
            severity: self.severity,
            visibility: self.visibility.clone(),
            channels,
            reminders_enabled: self.reminders_enabled.unwrap_or(true),
            reminder_interval,
            start_at: self.start_at.unwrap_or(now),
            expires_at: self.expires_at,
            archived: false,
            created_by: creator.id.clone(),
            created: now,
            updated: now,
        };
        if !alert.has_valid_window() {
            return Err(UseCaseError::InvalidWindow);
        }

        ctx.repos
            .alerts
            .insert(&alert)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(alert)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyAudienceOnAlertCreated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use klaxon_domain::User;
    use klaxon_infra::setup_context;

    struct TestContext {
        ctx: KlaxonContext,
        admin: User,
    }

    async fn setup() -> TestContext {
        let ctx = setup_context().await;
        let mut admin = User::new("Admin", "admin@example.com");
        admin.is_admin = true;
        ctx.repos.users.insert(&admin).await.unwrap();

        TestContext { ctx, admin }
    }

    fn default_usecase(created_by: ID) -> CreateAlertUseCase {
        CreateAlertUseCase {
            title: "Planned maintenance".into(),
            message: "The build cluster is going down at noon".into(),
            severity: Severity::Info,
            visibility: VisibilityRule::Organization,
            channels: None,
            start_at: None,
            expires_at: None,
            reminder_interval: None,
            reminders_enabled: None,
            created_by,
        }
    }

    #[tokio::test]
    async fn creates_alert_with_defaults() {
        let TestContext { ctx, admin } = setup().await;

        let mut usecase = default_usecase(admin.id.clone());
        let alert = usecase.execute(&ctx).await.unwrap();

        assert_eq!(alert.channels, vec![ChannelKind::InApp]);
        assert_eq!(alert.reminder_interval, DEFAULT_REMINDER_INTERVAL);
        assert!(alert.reminders_enabled);
        assert_eq!(alert.created_by, admin.id);
        assert!(ctx.repos.alerts.find(&alert.id).await.is_some());
    }

    #[tokio::test]
    async fn rejects_non_admin_creator() {
        let TestContext { ctx, .. } = setup().await;
        let user = User::new("Ola Nordmann", "ola@example.com");
        ctx.repos.users.insert(&user).await.unwrap();

        let mut usecase = default_usecase(user.id.clone());
        let res = usecase.execute(&ctx).await;

        assert_eq!(res.unwrap_err(), UseCaseError::NotAdmin);
    }

    #[tokio::test]
    async fn rejects_empty_title_and_message() {
        let TestContext { ctx, admin } = setup().await;

        let mut usecase = default_usecase(admin.id.clone());
        usecase.title = "  ".into();
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::EmptyTitle
        );

        let mut usecase = default_usecase(admin.id.clone());
        usecase.message = "".into();
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::EmptyMessage
        );
    }

    #[tokio::test]
    async fn rejects_expiry_before_start() {
        let TestContext { ctx, admin } = setup().await;

        let mut usecase = default_usecase(admin.id.clone());
        usecase.start_at = Some(1000);
        usecase.expires_at = Some(1000);
        let res = usecase.execute(&ctx).await;

        assert_eq!(res.unwrap_err(), UseCaseError::InvalidWindow);
    }

    #[tokio::test]
    async fn rejects_unknown_team_and_empty_user_audience() {
        let TestContext { ctx, admin } = setup().await;

        let mut usecase = default_usecase(admin.id.clone());
        usecase.visibility = VisibilityRule::Team(Default::default());
        assert!(matches!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::TeamNotFound(_)
        ));

        let mut usecase = default_usecase(admin.id.clone());
        usecase.visibility = VisibilityRule::Users(Vec::new());
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::EmptyUserAudience
        );
    }

    #[tokio::test]
    async fn notifies_the_audience_on_publish() {
        let TestContext { ctx, admin } = setup().await;
        let user = User::new("Ola Nordmann", "ola@example.com");
        ctx.repos.users.insert(&user).await.unwrap();

        let alert = execute(default_usecase(admin.id.clone()), &ctx)
            .await
            .unwrap();

        let inbox = ctx.repos.inbox.find_by_user(&user.id).await;
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].alert_id, alert.id);
        let preference = ctx
            .repos
            .preferences
            .find(&user.id, &alert.id)
            .await
            .unwrap();
        assert_eq!(preference.reminder_sequence, 1);
    }
}
