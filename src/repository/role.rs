use diesel::prelude::*;

use crate::{
    domain::role::{NewRole as DomainNewRole, Role as DomainRole},
    models::role::{NewRole as DbNewRole, Role as DbRole},
    repository::{DieselRepository, RepositoryResult, RoleReader, RoleWriter},
};

impl RoleReader for DieselRepository {
    fn list_roles(&self) -> RepositoryResult<Vec<DomainRole>> {
        use crate::schema::role;

        let mut conn = self.conn()?;

        let roles = role::table
            .order(role::id.asc())
            .load::<DbRole>(&mut conn)?;

        Ok(roles.into_iter().map(Into::into).collect())
    }

    fn get_role_by_id(&self, id: i32) -> RepositoryResult<Option<DomainRole>> {
        use crate::schema::role;

        let mut conn = self.conn()?;

        let found = role::table
            .find(id)
            .first::<DbRole>(&mut conn)
            .optional()?;

        Ok(found.map(Into::into))
    }
}

impl RoleWriter for DieselRepository {
    fn create_role(&self, new_role: &DomainNewRole) -> RepositoryResult<DomainRole> {
        use crate::schema::role;

        let mut conn = self.conn()?;
        let db_new = DbNewRole::from(new_role);

        let created = diesel::insert_into(role::table)
            .values(&db_new)
            .get_result::<DbRole>(&mut conn)?;

        Ok(created.into())
    }
}
