use crate::error::KlaxonError;
use crate::shared::usecase::UseCase;
use klaxon_domain::{Alert, ID};
use klaxon_infra::KlaxonContext;

/// Retires an alert. Reminders stop, user actions on it are rejected,
/// and its preference and delivery history stay queryable. Archiving an
/// already archived alert is a no-op.
#[derive(Debug)]
pub struct ArchiveAlertUseCase {
    pub alert_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for KlaxonError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(alert_id) => {
                Self::NotFound(format!("The alert with id: {}, was not found.", alert_id))
            }
            UseCaseError::StorageError => Self::DataAccess("Unable to store the alert".into()),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for ArchiveAlertUseCase {
    type Response = Alert;

    type Error = UseCaseError;

    const NAME: &'static str = "ArchiveAlert";

    async fn execute(&mut self, ctx: &KlaxonContext) -> Result<Self::Response, Self::Error> {
        let mut alert = ctx
            .repos
            .alerts
            .find(&self.alert_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.alert_id.clone()))?;

        if !alert.archived {
            alert.archived = true;
            alert.updated = ctx.sys.get_timestamp_millis();
            ctx.repos
                .alerts
                .save(&alert)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(alert)
    }
}
