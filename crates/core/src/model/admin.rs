use serde::{Deserialize, Serialize};

use crate::model::AdminId;

/// An administrative account. The elevated role is implied by the type;
/// there is no role field to get out of sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    id: AdminId,
    email: String,
    name: String,
}

impl AdminAccount {
    #[must_use]
    pub fn new(id: AdminId, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> AdminId {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
