use serde::{Deserialize, Serialize};

/// Authority that can be granted to a user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub authority: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewRole {
    pub authority: String,
}

impl NewRole {
    #[must_use]
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }
}
