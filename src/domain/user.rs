use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::role::Role;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Roles granted to the user, ordered by role id.
    pub roles: Vec<Role>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_ids: Vec<i32>,
}

impl NewUser {
    #[must_use]
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        Self {
            first_name,
            last_name,
            email: email.to_lowercase(),
            role_ids: Vec::new(),
        }
    }

    /// Grant the listed roles; duplicates are dropped.
    #[must_use]
    pub fn with_role_ids(mut self, role_ids: impl IntoIterator<Item = i32>) -> Self {
        let unique: BTreeSet<i32> = role_ids.into_iter().collect();
        self.role_ids = unique.into_iter().collect();
        self
    }
}
