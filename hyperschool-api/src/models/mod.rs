use std::{collections::HashMap, sync::Arc};

use async_graphql::{async_trait, dataloader::Loader, guard::Guard, Context, Object, Result};
use async_graphql::{EmptySubscription, Error, Schema};
use hyperschool_common::forms::{char_field, FormErrors, INVALID_CHOICE};
use hyperschool_common::utils::{Claims, Role};
use hyperschool_db::connection::{get_conn, PgPool};
use hyperschool_db::models::course::{Course as CourseData, NewCourse};
use hyperschool_db::models::student::{NewStudent, Student as StudentData};
use hyperschool_db::models::teacher::Teacher as TeacherData;

use course::{Course, CourseInput};
use student::{RegisterStudentInput, Student};
use teacher::Teacher;

use crate::get_conn_from_ctx;

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

const TITLE_MAX_LENGTH: usize = 100;

pub struct Query;

#[Object]
impl Query {
    /// Courses whose title contains `q`; every course when `q` is absent or empty.
    async fn courses(&self, ctx: &Context<'_>, q: Option<String>) -> Result<Vec<Course>> {
        let q = q.unwrap_or_default();
        Ok(CourseData::search_or_all(&q, &*get_conn_from_ctx(ctx)?)?
            .iter()
            .map(|c| c.into())
            .collect())
    }

    async fn course(&self, ctx: &Context<'_>, id: i32) -> Result<Course> {
        let ref course = CourseData::find(id, &*get_conn_from_ctx(ctx)?)?;
        Ok(course.into())
    }

    async fn teacher(&self, ctx: &Context<'_>, id: i32) -> Result<Teacher> {
        let ref teacher = TeacherData::find(id, &*get_conn_from_ctx(ctx)?)?;
        Ok(teacher.into())
    }

    async fn student(&self, ctx: &Context<'_>, id: i32) -> Result<Student> {
        let ref student = StudentData::find(id, &*get_conn_from_ctx(ctx)?)?;
        Ok(student.into())
    }
}

pub struct Mutation;

#[Object]
impl Mutation {
    /// Saves a student enrolled in exactly one course.
    async fn register_student(
        &self,
        ctx: &Context<'_>,
        input: RegisterStudentInput,
    ) -> Result<Student> {
        let conn = get_conn_from_ctx(ctx)?;
        let mut errors = FormErrors::new();
        let name = char_field(&mut errors, "name", &input.name, TITLE_MAX_LENGTH);
        let surname = char_field(&mut errors, "surname", &input.surname, TITLE_MAX_LENGTH);
        if !CourseData::exists(input.course_id, &conn)? {
            errors.add("courseId", INVALID_CHOICE);
        }
        let student = match (name, surname) {
            (Some(name), Some(surname)) if errors.is_empty() => NewStudent {
                name,
                surname,
                age: input.age,
            },
            _ => return Err(form_error(errors)),
        };

        let ref created = student.register(&[input.course_id], &conn)?;
        log::info!("registered student {} through the API", created.id);
        Ok(created.into())
    }

    #[graphql(guard(RoleGuard(role = "Role::Admin")))]
    async fn create_course(&self, ctx: &Context<'_>, input: CourseInput) -> Result<Course> {
        let conn = get_conn_from_ctx(ctx)?;
        let mut errors = FormErrors::new();
        let title = char_field(&mut errors, "title", &input.title, TITLE_MAX_LENGTH);

        let mut teacher_ids = input.teacher_ids.clone();
        teacher_ids.sort_unstable();
        teacher_ids.dedup();
        if TeacherData::find_many(&teacher_ids, &conn)?.len() != teacher_ids.len() {
            errors.add("teacherIds", INVALID_CHOICE);
        }
        let title = match title {
            Some(title) if errors.is_empty() => title,
            _ => return Err(form_error(errors)),
        };

        let new_course = NewCourse {
            title,
            info: input.info.unwrap_or_default(),
            duration_months: input.duration_months,
            price: input.price,
        };
        let ref created = new_course.create(&teacher_ids, &conn)?;
        log::info!("created course {} ({})", created.id, created.title);
        Ok(created.into())
    }
}

fn form_error(errors: FormErrors) -> Error {
    Error::new(errors.messages().join(" "))
}

pub(crate) struct RoleGuard {
    role: Role,
}

#[async_trait::async_trait]
impl Guard for RoleGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        match get_role_from_ctx(ctx) {
            Some(role) => {
                if role == self.role {
                    Ok(())
                } else {
                    Err("Forbidden".into())
                }
            }
            None => Err("Not Login".into()),
        }
    }
}

fn get_role_from_ctx(ctx: &Context<'_>) -> Option<Role> {
    ctx.data_opt::<Claims>().and_then(|c| c.role())
}

pub struct TeacherLoader {
    pub pool: Arc<PgPool>,
}

#[async_trait::async_trait]
impl Loader<i32> for TeacherLoader {
    type Value = Teacher;
    type Error = Error;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        let conn = get_conn(&self.pool)?;
        let teachers = TeacherData::find_many(keys, &conn)?;
        Ok(teachers.iter().map(|t| (t.id, t.into())).collect())
    }
}

pub mod course;
pub mod student;
pub mod teacher;
