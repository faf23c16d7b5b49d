use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A member of the organization that `Alert`s can be delivered to.
///
/// Membership is owned by an external directory. This is the snapshot row
/// the delivery engine resolves audiences against, so it carries just the
/// fields resolution and the channels need.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ID,
    pub name: String,
    /// Delivery address for the `Email` channel
    pub email: String,
    /// Delivery address for the `Sms` channel. A missing number fails
    /// SMS delivery for this user, it does not remove them from audiences.
    pub phone: Option<String>,
    pub team_id: Option<ID>,
    pub is_admin: bool,
}

impl User {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            email: email.into(),
            phone: None,
            team_id: None,
            is_admin: false,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
