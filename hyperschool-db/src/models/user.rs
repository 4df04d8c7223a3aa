use crate::schema::users;
use crate::schema::users::dsl::*;
use chrono::prelude::*;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error};
use diesel::PgConnection;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Debug, Serialize, Deserialize, Clone, Identifiable)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub hash_pwd: String,
    pub user_role: String,
    pub is_active: bool,
    pub date_joined: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

impl User {
    pub fn get_by_username(name: &str, conn: &PgConnection) -> QueryResult<Self> {
        users.filter(username.eq(name)).first(conn)
    }

    pub fn update_last_login(&self, time: NaiveDateTime, conn: &PgConnection) -> QueryResult<()> {
        diesel::update(self)
            .set(last_login.eq(time))
            .execute(conn)?;
        Ok(())
    }
}

#[derive(Insertable, Serialize, Deserialize, Debug)]
#[table_name = "users"]
pub struct NewUser {
    pub username: String,
    pub hash_pwd: String,
    pub user_role: String,
}

impl NewUser {
    pub fn create(&self, conn: &PgConnection) -> QueryResult<User> {
        diesel::insert_into(users::table)
            .values(self)
            .get_result(conn)
    }

    /// Like `create`, but `None` when the username is already taken.
    pub fn create_unique(&self, conn: &PgConnection) -> QueryResult<Option<User>> {
        match self.create(conn) {
            Ok(user) => Ok(Some(user)),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn is_unique_violation(e: &Error) -> bool {
    matches!(e, Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_recognised() {
        let duplicate = Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("duplicate key value violates unique constraint")),
        );
        assert!(is_unique_violation(&duplicate));

        let other = Error::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new(String::from("violates foreign key constraint")),
        );
        assert!(!is_unique_violation(&other));
        assert!(!is_unique_violation(&Error::NotFound));
    }
}
