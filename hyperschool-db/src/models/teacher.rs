use crate::schema::teachers::dsl::*;
use crate::schema::teachers;
use diesel::prelude::*;
use diesel::{dsl::any, PgConnection};
use serde::{Deserialize, Serialize};

use super::course::Course;

#[derive(Queryable, Debug, Serialize, Deserialize, Clone, PartialEq, Identifiable)]
#[table_name = "teachers"]
pub struct Teacher {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub about: String,
}

impl Teacher {
    pub fn find(tid: i32, conn: &PgConnection) -> QueryResult<Self> {
        teachers.find(tid).first(conn)
    }

    pub fn find_many(ids: &[i32], conn: &PgConnection) -> QueryResult<Vec<Self>> {
        teachers.filter(id.eq(any(ids))).load(conn)
    }

    pub fn courses(&self, conn: &PgConnection) -> QueryResult<Vec<Course>> {
        Course::taught_by(self.id, conn)
    }
}
