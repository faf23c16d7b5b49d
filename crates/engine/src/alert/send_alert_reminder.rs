use crate::error::KlaxonError;
use crate::reminders::dispatch::{deliver_alert_reminders, AlertDeliveryReport, DispatchError};
use crate::shared::usecase::UseCase;
use klaxon_domain::{LifecycleState, ID};
use klaxon_infra::KlaxonContext;

/// Manual resend for one alert, outside the scheduler cadence. Skips the
/// interval check for the whole audience and ignores `reminders_enabled`,
/// but still honors read and snooze, users who dealt with the alert are
/// left alone.
#[derive(Debug)]
pub struct SendAlertReminderUseCase {
    pub alert_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotActive(ID),
    StorageError,
}

impl From<UseCaseError> for KlaxonError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(alert_id) => {
                Self::NotFound(format!("The alert with id: {}, was not found.", alert_id))
            }
            UseCaseError::NotActive(alert_id) => Self::InvalidState(format!(
                "The alert with id: {}, is not active and inside its delivery window.",
                alert_id
            )),
            UseCaseError::StorageError => {
                Self::DataAccess("Unable to read the membership snapshot".into())
            }
        }
    }
}

#[async_trait::async_trait]
impl UseCase for SendAlertReminderUseCase {
    type Response = AlertDeliveryReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendAlertReminder";

    async fn execute(&mut self, ctx: &KlaxonContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let alert = ctx
            .repos
            .alerts
            .find(&self.alert_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.alert_id.clone()))?;

        if alert.lifecycle_state(now) != LifecycleState::Active || !alert.is_within_window(now) {
            return Err(UseCaseError::NotActive(self.alert_id.clone()));
        }

        deliver_alert_reminders(&alert, now, true, ctx)
            .await
            .map_err(|e| match e {
                DispatchError::MembershipUnavailable => UseCaseError::StorageError,
            })
    }
}
