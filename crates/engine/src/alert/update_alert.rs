use crate::error::KlaxonError;
use crate::shared::usecase::UseCase;
use klaxon_domain::{Alert, ChannelKind, Severity, ID};
use klaxon_infra::KlaxonContext;

/// Edits a live alert. Only the provided fields change; the visibility
/// rule and the start time have no fields here on purpose, they cannot
/// be edited after publication. Archived alerts are frozen.
#[derive(Debug)]
pub struct UpdateAlertUseCase {
    pub alert_id: ID,
    pub title: Option<String>,
    pub message: Option<String>,
    pub severity: Option<Severity>,
    pub channels: Option<Vec<ChannelKind>>,
    pub expires_at: Option<i64>,
    pub reminder_interval: Option<i64>,
    pub reminders_enabled: Option<bool>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Archived(ID),
    EmptyTitle,
    EmptyMessage,
    NoChannels,
    InvalidReminderInterval,
    InvalidWindow,
    StorageError,
}

impl From<UseCaseError> for KlaxonError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(alert_id) => {
                Self::NotFound(format!("The alert with id: {}, was not found.", alert_id))
            }
            UseCaseError::Archived(alert_id) => Self::InvalidState(format!(
                "The alert with id: {}, is archived and can no longer be edited.",
                alert_id
            )),
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
            UseCaseError::StorageError => Self::DataAccess("Unable to store the alert".into()),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for UpdateAlertUseCase {
    type Response = Alert;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateAlert";

    async fn execute(&mut self, ctx: &KlaxonContext) -> Result<Self::Response, Self::Error> {
        let mut alert = ctx
            .repos
            .alerts
            .find(&self.alert_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.alert_id.clone()))?;
        if alert.archived {
            return Err(UseCaseError::Archived(self.alert_id.clone()));
        }

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(UseCaseError::EmptyTitle);
            }
            alert.title = title.clone();
        }
        if let Some(message) = &self.message {
            if message.trim().is_empty() {
                return Err(UseCaseError::EmptyMessage);
            }
            alert.message = message.clone();
        }
        if let Some(severity) = self.severity {
            alert.severity = severity;
        }
        if let Some(channels) = &self.channels {
            if channels.is_empty() {
                return Err(UseCaseError::NoChannels);
            }
            alert.channels = channels.clone();
        }
        if let Some(expires_at) = self.expires_at {
            alert.expires_at = Some(expires_at);
        }
        if let Some(reminder_interval) = self.reminder_interval {
            if reminder_interval <= 0 {
                return Err(UseCaseError::InvalidReminderInterval);
            }
            alert.reminder_interval = reminder_interval;
        }
        if let Some(reminders_enabled) = self.reminders_enabled {
            alert.reminders_enabled = reminders_enabled;
        }

        if !alert.has_valid_window() {
            return Err(UseCaseError::InvalidWindow);
        }

        alert.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .alerts
            .save(&alert)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(alert)
    }
}
