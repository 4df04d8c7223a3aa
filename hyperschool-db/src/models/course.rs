use crate::schema::courses::dsl::*;
use crate::schema::{course_teachers, courses, student_courses, teachers};
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};

use super::student::Student;
use super::teacher::Teacher;

#[derive(Queryable, Debug, Serialize, Deserialize, Clone, PartialEq, Identifiable)]
#[table_name = "courses"]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub info: String,
    pub duration_months: i32,
    pub price: i32,
}

impl Course {
    pub fn find(cid: i32, conn: &PgConnection) -> QueryResult<Self> {
        courses.find(cid).first(conn)
    }

    pub fn list_all(conn: &PgConnection) -> QueryResult<Vec<Self>> {
        courses.order(id).load(conn)
    }

    /// Courses whose title contains `query`, case-sensitively.
    pub fn search(query: &str, conn: &PgConnection) -> QueryResult<Vec<Self>> {
        courses
            .filter(title.like(contains_pattern(query)))
            .order(id)
            .load(conn)
    }

    /// All courses when `query` is empty, the matching ones otherwise.
    pub fn search_or_all(query: &str, conn: &PgConnection) -> QueryResult<Vec<Self>> {
        if query.is_empty() {
            Self::list_all(conn)
        } else {
            Self::search(query, conn)
        }
    }

    pub fn exists(cid: i32, conn: &PgConnection) -> QueryResult<bool> {
        diesel::select(diesel::dsl::exists(courses.find(cid))).get_result(conn)
    }

    pub fn teachers(&self, conn: &PgConnection) -> QueryResult<Vec<Teacher>> {
        course_teachers::table
            .inner_join(teachers::table)
            .filter(course_teachers::course_id.eq(self.id))
            .select(teachers::all_columns)
            .order(teachers::id)
            .load(conn)
    }

    pub fn teacher_ids(cid: i32, conn: &PgConnection) -> QueryResult<Vec<i32>> {
        course_teachers::table
            .filter(course_teachers::course_id.eq(cid))
            .select(course_teachers::teacher_id)
            .order(course_teachers::teacher_id)
            .load(conn)
    }

    pub fn students(&self, conn: &PgConnection) -> QueryResult<Vec<Student>> {
        Student::enrolled_in(self.id, conn)
    }

    pub fn taught_by(tid: i32, conn: &PgConnection) -> QueryResult<Vec<Self>> {
        course_teachers::table
            .inner_join(courses::table)
            .filter(course_teachers::teacher_id.eq(tid))
            .select(courses::all_columns)
            .order(courses::id)
            .load(conn)
    }

    pub fn taken_by(sid: i32, conn: &PgConnection) -> QueryResult<Vec<Self>> {
        student_courses::table
            .inner_join(courses::table)
            .filter(student_courses::student_id.eq(sid))
            .select(courses::all_columns)
            .order(courses::id)
            .load(conn)
    }
}

/// Builds a `LIKE` pattern matching any value that contains `query`
/// literally; `\`, `%` and `_` are escaped.
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[table_name = "courses"]
pub struct NewCourse {
    pub title: String,
    pub info: String,
    pub duration_months: i32,
    pub price: i32,
}

#[derive(Insertable)]
#[table_name = "course_teachers"]
struct CourseTeacher {
    course_id: i32,
    teacher_id: i32,
}

impl NewCourse {
    /// Inserts the course and links it to `teacher_ids` in one transaction.
    pub fn create(&self, teacher_ids: &[i32], conn: &PgConnection) -> QueryResult<Course> {
        conn.transaction(|| {
            let course: Course = diesel::insert_into(courses::table)
                .values(self)
                .get_result(conn)?;
            let links: Vec<CourseTeacher> = teacher_ids
                .iter()
                .map(|&tid| CourseTeacher {
                    course_id: course.id,
                    teacher_id: tid,
                })
                .collect();
            if !links.is_empty() {
                diesel::insert_into(course_teachers::table)
                    .values(&links)
                    .execute(conn)?;
            }
            Ok(course)
        })
    }
}
