use crate::error::KlaxonError;
use crate::shared::usecase::UseCase;
use klaxon_domain::{visibility, AlertPreference, ID};
use klaxon_infra::KlaxonContext;

/// Marks an alert as read for one user. A read pair is skipped by every
/// future reminder pass until it is marked unread again. Idempotent.
#[derive(Debug)]
pub struct MarkAlertReadUseCase {
    pub user_id: ID,
    pub alert_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    AlertNotFound(ID),
    UserNotFound(ID),
    AlertArchived(ID),
    NotVisible,
    StorageError,
}

impl From<UseCaseError> for KlaxonError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::AlertNotFound(alert_id) => {
                Self::NotFound(format!("The alert with id: {}, was not found.", alert_id))
            }
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::AlertArchived(alert_id) => Self::InvalidState(format!(
                "The alert with id: {}, is archived.",
                alert_id
            )),
            UseCaseError::NotVisible => {
                Self::InvalidState("The alert is not visible to this user".into())
            }
            UseCaseError::StorageError => {
                Self::DataAccess("Unable to store the preference".into())
            }
        }
    }
}

#[async_trait::async_trait]
impl UseCase for MarkAlertReadUseCase {
    type Response = AlertPreference;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkAlertRead";

    async fn execute(&mut self, ctx: &KlaxonContext) -> Result<Self::Response, Self::Error> {
        let alert = ctx
            .repos
            .alerts
            .find(&self.alert_id)
            .await
            .ok_or_else(|| UseCaseError::AlertNotFound(self.alert_id.clone()))?;
        let user = ctx
            .repos
            .users
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        if alert.archived {
            return Err(UseCaseError::AlertArchived(self.alert_id.clone()));
        }
        if !visibility::user_can_see(&alert.visibility, &user) {
            return Err(UseCaseError::NotVisible);
        }

        let _guard = ctx.preference_locks.lock(&self.user_id, &self.alert_id).await;

        let mut preference = ctx
            .repos
            .preferences
            .get_or_create(&self.user_id, &self.alert_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if !preference.read {
            preference.read = true;
            ctx.repos
                .preferences
                .save(&preference)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(preference)
    }
}
