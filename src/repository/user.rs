use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::role::Role as DomainRole,
    domain::user::{NewUser as DomainNewUser, User as DomainUser},
    models::role::{NewUserRole, Role as DbRole},
    models::user::{NewUser as DbNewUser, User as DbUser},
    repository::{DieselRepository, RepositoryError, RepositoryResult, UserReader, UserWriter},
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::app_user;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let user = app_user::table
                .find(id)
                .first::<DbUser>(conn)
                .optional()?;

            user.map(|user| with_roles(conn, user)).transpose()
        })
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::app_user;

        let mut conn = self.conn()?;
        let email = email.to_lowercase();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let user = app_user::table
                .filter(app_user::email.eq(&email))
                .first::<DbUser>(conn)
                .optional()?;

            user.map(|user| with_roles(conn, user)).transpose()
        })
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::{app_user, user_role};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_new = DbNewUser::from(new_user);

            let created = diesel::insert_into(app_user::table)
                .values(&db_new)
                .get_result::<DbUser>(conn)?;

            if !new_user.role_ids.is_empty() {
                let grants: Vec<NewUserRole> = new_user
                    .role_ids
                    .iter()
                    .map(|&role_id| NewUserRole {
                        user_id: created.id,
                        role_id,
                    })
                    .collect();

                diesel::insert_into(user_role::table)
                    .values(&grants)
                    .execute(conn)?;
            }

            with_roles(conn, created)
        })
    }
}

fn with_roles(conn: &mut SqliteConnection, user: DbUser) -> RepositoryResult<DomainUser> {
    use crate::schema::{role, user_role};

    let roles = user_role::table
        .inner_join(role::table)
        .filter(user_role::user_id.eq(user.id))
        .order(role::id.asc())
        .select(role::all_columns)
        .load::<DbRole>(conn)?;

    let mut domain: DomainUser = user.into();
    domain.roles = roles.into_iter().map(DomainRole::from).collect();

    Ok(domain)
}
