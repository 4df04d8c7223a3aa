use async_graphql::{dataloader::DataLoader, *};
use hyperschool_db::models::course::Course as CourseData;
use hyperschool_db::models::student::Student as StudentData;

use crate::get_conn_from_ctx;

use super::{student::Student, teacher::Teacher, TeacherLoader};

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Course {
    id: i32,
    title: String,
    info: String,
    duration_months: i32,
    price: i32,
}

#[ComplexObject]
impl Course {
    async fn teachers(&self, ctx: &Context<'_>) -> Result<Vec<Teacher>> {
        let ids = CourseData::teacher_ids(self.id, &*get_conn_from_ctx(ctx)?)?;
        let loaded = ctx
            .data_unchecked::<DataLoader<TeacherLoader>>()
            .load_many(ids.iter().copied())
            .await?;
        Ok(ids.iter().filter_map(|id| loaded.get(id).cloned()).collect())
    }

    async fn students(&self, ctx: &Context<'_>) -> Result<Vec<Student>> {
        Ok(StudentData::enrolled_in(self.id, &*get_conn_from_ctx(ctx)?)?
            .iter()
            .map(|s| s.into())
            .collect())
    }
}

impl From<&CourseData> for Course {
    fn from(course: &CourseData) -> Self {
        Course {
            id: course.id,
            title: course.title.clone(),
            info: course.info.clone(),
            duration_months: course.duration_months,
            price: course.price,
        }
    }
}

#[derive(InputObject)]
pub struct CourseInput {
    pub title: String,
    pub info: Option<String>,
    #[graphql(default)]
    pub duration_months: i32,
    #[graphql(default)]
    pub price: i32,
    #[graphql(default)]
    pub teacher_ids: Vec<i32>,
}
