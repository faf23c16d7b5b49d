use super::dispatch::{deliver_alert_reminders, AlertDeliveryReport};
use crate::error::KlaxonError;
use crate::shared::usecase::UseCase;
use klaxon_infra::KlaxonContext;
use serde::Serialize;
use tracing::{error, info};

/// One scheduler tick: scan every alert and run a reminder pass for the
/// eligible ones. A failing alert never takes the rest of the tick down,
/// only failing to read the alert list does.
#[derive(Debug)]
pub struct ProcessRemindersUseCase;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSummary {
    /// Alerts that passed the eligibility gate this tick
    pub alerts_considered: usize,
    /// Alerts whose whole reminder pass failed
    pub alerts_failed: usize,
    pub users_reminded: usize,
    pub users_skipped: usize,
    pub users_failed: usize,
}

impl TickSummary {
    fn absorb(&mut self, report: &AlertDeliveryReport) {
        self.users_reminded += report.reminded;
        self.users_skipped += report.skipped;
        self.users_failed += report.failed;
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for KlaxonError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => {
                Self::DataAccess("Unable to read the alert list for the reminder tick".into())
            }
        }
    }
}

#[async_trait::async_trait]
impl UseCase for ProcessRemindersUseCase {
    type Response = TickSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "ProcessReminders";

    async fn execute(&mut self, ctx: &KlaxonContext) -> Result<Self::Response, Self::Error> {
        // One time snapshot for the whole tick. An alert expiring while
        // the tick runs is still finished against this timestamp.
        let now = ctx.sys.get_timestamp_millis();

        let alerts = ctx.repos.alerts.find_all().await.map_err(|e| {
            error!("Unable to read alerts for the reminder tick: {:?}", e);
            UseCaseError::StorageError
        })?;

        let mut summary = TickSummary::default();
        for alert in alerts {
            if !alert.is_reminder_eligible(now) {
                continue;
            }
            summary.alerts_considered += 1;

            match deliver_alert_reminders(&alert, now, false, ctx).await {
                Ok(report) => summary.absorb(&report),
                Err(e) => {
                    error!("Reminder pass failed for alert {}: {:?}", alert.id, e);
                    summary.alerts_failed += 1;
                }
            }
        }

        if summary.alerts_considered > 0 {
            info!(
                "Reminder tick done. Alerts considered: {}, users reminded: {}, skipped: {}, failed: {}",
                summary.alerts_considered,
                summary.users_reminded,
                summary.users_skipped,
                summary.users_failed
            );
        }

        Ok(summary)
    }
}
