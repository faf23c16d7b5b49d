use futures::StreamExt;
use klaxon_domain::{visibility, Alert, DeliveryRecord, User};
use klaxon_infra::KlaxonContext;
use serde::Serialize;
use std::collections::HashMap;
use tracing::error;

/// What happened to one alert's audience during a reminder pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDeliveryReport {
    /// Users the visibility rule resolved to
    pub audience: usize,
    /// Users that had at least one channel delivered this pass
    pub reminded: usize,
    /// Users skipped because they had read, snoozed or were not due
    pub skipped: usize,
    /// Users for which no channel went through or whose state could
    /// not be persisted
    pub failed: usize,
}

#[derive(Debug, PartialEq)]
pub enum DispatchError {
    /// The membership snapshot could not be read, nothing was attempted
    MembershipUnavailable,
}

enum PairOutcome {
    Reminded,
    Skipped,
    Failed,
}

/// Runs one reminder pass for a single alert: resolve the audience from
/// the current membership snapshot, then push every user through the
/// per-pair pipeline with bounded concurrency.
///
/// `force_due` bypasses the interval check (manual resend), never the
/// read and snooze gates.
pub(crate) async fn deliver_alert_reminders(
    alert: &Alert,
    now: i64,
    force_due: bool,
    ctx: &KlaxonContext,
) -> Result<AlertDeliveryReport, DispatchError> {
    let users = ctx.repos.users.find_all().await.map_err(|e| {
        error!(
            "Unable to read the membership snapshot for alert {}: {:?}",
            alert.id, e
        );
        DispatchError::MembershipUnavailable
    })?;

    let audience = visibility::resolve_audience(&alert.visibility, &users);
    let users_by_id = users.iter().map(|u| (&u.id, u)).collect::<HashMap<_, _>>();

    // The pair futures are built eagerly (they are inert until polled)
    // instead of mapped on the stream, so no closure over `&User` ends up
    // inside the held future type; rustc cannot prove such closures
    // general enough across the `async_trait` Send boundary.
    let pair_futures = audience
        .iter()
        .filter_map(|user_id| users_by_id.get(user_id).copied())
        .map(|user| remind_user(alert, user, now, force_due, ctx))
        .collect::<Vec<_>>();

    let outcomes = futures::stream::iter(pair_futures)
        .buffer_unordered(ctx.config.dispatch_concurrency)
        .collect::<Vec<_>>()
        .await;

    let mut report = AlertDeliveryReport {
        audience: audience.len(),
        ..Default::default()
    };
    for outcome in outcomes {
        match outcome {
            PairOutcome::Reminded => report.reminded += 1,
            PairOutcome::Skipped => report.skipped += 1,
            PairOutcome::Failed => report.failed += 1,
        }
    }

    Ok(report)
}

/// The per-pair pipeline. The pair lock is held across the whole
/// check, deliver, record and advance sequence so user actions and
/// overlapping passes cannot interleave with it.
async fn remind_user(
    alert: &Alert,
    user: &User,
    now: i64,
    force_due: bool,
    ctx: &KlaxonContext,
) -> PairOutcome {
    let _guard = ctx.preference_locks.lock(&user.id, &alert.id).await;

    let mut preference = match ctx.repos.preferences.get_or_create(&user.id, &alert.id).await {
        Ok(preference) => preference,
        Err(e) => {
            error!(
                "Unable to load preference for user {} and alert {}: {:?}",
                user.id, alert.id, e
            );
            return PairOutcome::Failed;
        }
    };

    if preference.read || preference.is_snoozed(now) {
        return PairOutcome::Skipped;
    }
    if !force_due && !preference.is_due(now, alert.reminder_interval) {
        return PairOutcome::Skipped;
    }

    let sequence = preference.reminder_sequence + 1;
    let mut records = Vec::with_capacity(alert.channels.len());
    let mut any_delivered = false;
    for channel in &alert.channels {
        let outcome = ctx
            .channels
            .deliver(*channel, user, alert, sequence, now)
            .await;
        any_delivered = any_delivered || outcome.is_delivered();
        records.push(DeliveryRecord {
            id: Default::default(),
            alert_id: alert.id.clone(),
            user_id: user.id.clone(),
            channel: *channel,
            attempted_at: now,
            outcome,
            sequence,
        });
    }

    // The log is written before the preference advances. A pair whose
    // records cannot be written stays due, so the next pass retries it.
    for record in &records {
        if let Err(e) = ctx.repos.deliveries.insert(record).await {
            error!(
                "Unable to record delivery attempt for user {} and alert {}: {:?}",
                user.id, alert.id, e
            );
            return PairOutcome::Failed;
        }
    }

    if !any_delivered {
        return PairOutcome::Failed;
    }

    preference.last_reminded_at = Some(now);
    preference.reminder_sequence = sequence;
    if let Err(e) = ctx.repos.preferences.save(&preference).await {
        error!(
            "Unable to advance reminder state for user {} and alert {}: {:?}",
            user.id, alert.id, e
        );
        return PairOutcome::Failed;
    }

    PairOutcome::Reminded
}
