use crate::error::KlaxonError;
use crate::shared::usecase::UseCase;
use klaxon_domain::{DeliveryRecord, ID};
use klaxon_infra::KlaxonContext;

/// Audit read path: what was attempted for a user, when, over which
/// channel and how it went, oldest first. Optionally narrowed to one
/// alert. Archived alerts keep their history.
#[derive(Debug)]
pub struct GetDeliveryHistoryUseCase {
    pub user_id: ID,
    pub alert_id: Option<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    UserNotFound(ID),
    AlertNotFound(ID),
}

impl From<UseCaseError> for KlaxonError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::AlertNotFound(alert_id) => {
                Self::NotFound(format!("The alert with id: {}, was not found.", alert_id))
            }
        }
    }
}

#[async_trait::async_trait]
impl UseCase for GetDeliveryHistoryUseCase {
    type Response = Vec<DeliveryRecord>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetDeliveryHistory";

    async fn execute(&mut self, ctx: &KlaxonContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        match &self.alert_id {
            Some(alert_id) => {
                if ctx.repos.alerts.find(alert_id).await.is_none() {
                    return Err(UseCaseError::AlertNotFound(alert_id.clone()));
                }
                Ok(ctx
                    .repos
                    .deliveries
                    .find_by_user_and_alert(&self.user_id, alert_id)
                    .await)
            }
            None => Ok(ctx.repos.deliveries.find_by_user(&self.user_id).await),
        }
    }
}
