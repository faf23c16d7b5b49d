use crate::error::KlaxonError;
use crate::shared::usecase::UseCase;
use klaxon_domain::{visibility, AlertPreference, ID};
use klaxon_infra::KlaxonContext;

/// Puts an alert back into the reminder rotation for one user. The
/// interval still counts from the last delivered pass, so unreading does
/// not trigger an immediate reminder. Idempotent.
#[derive(Debug)]
pub struct MarkAlertUnreadUseCase {
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
impl UseCase for MarkAlertUnreadUseCase {
    type Response = AlertPreference;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkAlertUnread";

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

        if preference.read {
            preference.read = false;
            ctx.repos
                .preferences
                .save(&preference)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(preference)
    }
}
