use async_graphql::*;
use hyperschool_db::models::course::Course as CourseData;
use hyperschool_db::models::teacher::Teacher as TeacherData;

use crate::get_conn_from_ctx;

use super::course::Course;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Teacher {
    id: i32,
    name: String,
    surname: String,
    age: i32,
    about: String,
}

#[ComplexObject]
impl Teacher {
    async fn courses(&self, ctx: &Context<'_>) -> Result<Vec<Course>> {
        Ok(CourseData::taught_by(self.id, &*get_conn_from_ctx(ctx)?)?
            .iter()
            .map(|c| c.into())
            .collect())
    }
}

impl From<&TeacherData> for Teacher {
    fn from(teacher: &TeacherData) -> Self {
        Teacher {
            id: teacher.id,
            name: teacher.name.clone(),
            surname: teacher.surname.clone(),
            age: teacher.age,
            about: teacher.about.clone(),
        }
    }
}
