use async_graphql::*;
use hyperschool_db::models::course::Course as CourseData;
use hyperschool_db::models::student::Student as StudentData;

use crate::get_conn_from_ctx;

use super::course::Course;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Student {
    id: i32,
    name: String,
    surname: String,
    age: i32,
}

#[ComplexObject]
impl Student {
    async fn courses(&self, ctx: &Context<'_>) -> Result<Vec<Course>> {
        Ok(CourseData::taken_by(self.id, &*get_conn_from_ctx(ctx)?)?
            .iter()
            .map(|c| c.into())
            .collect())
    }
}

impl From<&StudentData> for Student {
    fn from(student: &StudentData) -> Self {
        Student {
            id: student.id,
            name: student.name.clone(),
            surname: student.surname.clone(),
            age: student.age,
        }
    }
}

#[derive(InputObject)]
pub struct RegisterStudentInput {
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub course_id: i32,
}
