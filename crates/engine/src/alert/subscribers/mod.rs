use super::create_alert::CreateAlertUseCase;
use crate::reminders::dispatch::deliver_alert_reminders;
use crate::shared::usecase::Subscriber;
use klaxon_domain::Alert;
use klaxon_infra::KlaxonContext;
use tracing::error;

/// Runs the first delivery pass as soon as an alert is published, so the
/// audience hears about it right away instead of at the next tick.
pub struct NotifyAudienceOnAlertCreated;

#[async_trait::async_trait]
impl Subscriber<CreateAlertUseCase> for NotifyAudienceOnAlertCreated {
    async fn notify(&self, e: &Alert, ctx: &KlaxonContext) {
        let now = ctx.sys.get_timestamp_millis();
        // Scheduled and muted alerts wait for their tick
        if !e.is_reminder_eligible(now) {
            return;
        }

        if let Err(err) = deliver_alert_reminders(e, now, false, ctx).await {
            error!("Unable to notify the audience of new alert {}: {:?}", e.id, err);
        }
    }
}
