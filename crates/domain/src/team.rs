use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A team within the organization, usable as an `Alert` visibility target
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: ID,
    pub name: String,
}

impl Team {
    pub fn new(name: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
        }
    }
}

impl Entity for Team {
    fn id(&self) -> &ID {
        &self.id
    }
}
