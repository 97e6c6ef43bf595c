use diesel::prelude::*;

use crate::domain::role::{NewRole as DomainNewRole, Role as DomainRole};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::role)]
pub struct Role {
    pub id: i32,
    pub authority: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::role)]
pub struct NewRole<'a> {
    pub authority: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::user_role)]
pub struct NewUserRole {
    pub user_id: i32,
    pub role_id: i32,
}

impl From<Role> for DomainRole {
    fn from(value: Role) -> Self {
        Self {
            id: value.id,
            authority: value.authority,
        }
    }
}

impl<'a> From<&'a DomainNewRole> for NewRole<'a> {
    fn from(value: &'a DomainNewRole) -> Self {
        Self {
            authority: value.authority.as_str(),
        }
    }
}
