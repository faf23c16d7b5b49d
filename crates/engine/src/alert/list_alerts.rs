use crate::error::KlaxonError;
use crate::shared::usecase::UseCase;
use klaxon_domain::{Alert, LifecycleState, Severity};
use klaxon_infra::KlaxonContext;

/// Admin listing of alerts with optional lifecycle and severity filters.
/// Lifecycle is evaluated against the clock at call time, so the same
/// stored alert can move from `Active` to `Expired` between two calls.
#[derive(Debug)]
pub struct ListAlertsUseCase {
    pub status: Option<LifecycleState>,
    pub severity: Option<Severity>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for KlaxonError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::DataAccess("Unable to read the alerts".into()),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for ListAlertsUseCase {
    type Response = Vec<Alert>;

    type Error = UseCaseError;

    const NAME: &'static str = "ListAlerts";

    async fn execute(&mut self, ctx: &KlaxonContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let mut alerts = ctx
            .repos
            .alerts
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if let Some(status) = self.status {
            alerts.retain(|alert| alert.lifecycle_state(now) == status);
        }
        if let Some(severity) = self.severity {
            alerts.retain(|alert| alert.severity == severity);
        }
        alerts.sort_by_key(|alert| std::cmp::Reverse(alert.created));

        Ok(alerts)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use klaxon_domain::{ChannelKind, VisibilityRule};
    use klaxon_infra::setup_context;

    async fn add_alert(ctx: &KlaxonContext, severity: Severity, archived: bool) -> Alert {
        let alert = Alert {
            id: Default::default(),
            title: "Some incident".into(),
            message: "Something needs attention".into(),
            severity,
            visibility: VisibilityRule::Organization,
            channels: vec![ChannelKind::InApp],
            reminders_enabled: true,
            reminder_interval: 1000 * 60,
            start_at: 0,
            expires_at: None,
            archived,
            created_by: Default::default(),
            created: 0,
            updated: 0,
        };
        ctx.repos.alerts.insert(&alert).await.unwrap();
        alert
    }

    #[tokio::test]
    async fn filters_by_lifecycle_and_severity() {
        let ctx = setup_context().await;
        add_alert(&ctx, Severity::Info, false).await;
        let critical = add_alert(&ctx, Severity::Critical, false).await;
        add_alert(&ctx, Severity::Critical, true).await;

        let mut usecase = ListAlertsUseCase {
            status: None,
            severity: None,
        };
        assert_eq!(usecase.execute(&ctx).await.unwrap().len(), 3);

        let mut usecase = ListAlertsUseCase {
            status: Some(LifecycleState::Active),
            severity: Some(Severity::Critical),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].id, critical.id);

        let mut usecase = ListAlertsUseCase {
            status: Some(LifecycleState::Archived),
            severity: None,
        };
        assert_eq!(usecase.execute(&ctx).await.unwrap().len(), 1);
    }
}
