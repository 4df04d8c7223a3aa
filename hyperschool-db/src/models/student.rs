use crate::schema::students::dsl::*;
use crate::schema::{student_courses, students};
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};

use super::course::Course;

#[derive(Queryable, Debug, Serialize, Deserialize, Clone, PartialEq, Identifiable)]
#[table_name = "students"]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub age: i32,
}

#[derive(Insertable)]
#[table_name = "student_courses"]
struct Enrollment {
    student_id: i32,
    course_id: i32,
}

impl Student {
    pub fn find(sid: i32, conn: &PgConnection) -> QueryResult<Self> {
        students.find(sid).first(conn)
    }

    pub fn courses(&self, conn: &PgConnection) -> QueryResult<Vec<Course>> {
        Course::taken_by(self.id, conn)
    }

    pub fn enrolled_in(cid: i32, conn: &PgConnection) -> QueryResult<Vec<Self>> {
        student_courses::table
            .inner_join(students::table)
            .filter(student_courses::course_id.eq(cid))
            .select(students::all_columns)
            .order(students::id)
            .load(conn)
    }

    /// Replaces the student's enrollments with exactly `course_ids`.
    pub fn set_courses(&self, course_ids: &[i32], conn: &PgConnection) -> QueryResult<()> {
        conn.transaction(|| {
            diesel::delete(
                student_courses::table.filter(student_courses::student_id.eq(self.id)),
            )
            .execute(conn)?;
            let rows: Vec<Enrollment> = course_ids
                .iter()
                .map(|&cid| Enrollment {
                    student_id: self.id,
                    course_id: cid,
                })
                .collect();
            if !rows.is_empty() {
                diesel::insert_into(student_courses::table)
                    .values(&rows)
                    .execute(conn)?;
            }
            Ok(())
        })
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Insertable)]
#[table_name = "students"]
pub struct NewStudent {
    pub name: String,
    pub surname: String,
    pub age: i32,
}

impl NewStudent {
    /// Saves the student and enrolls it in `course_ids`; nothing is kept
    /// if any step fails.
    pub fn register(&self, course_ids: &[i32], conn: &PgConnection) -> QueryResult<Student> {
        conn.transaction(|| {
            let student: Student = diesel::insert_into(students::table)
                .values(self)
                .get_result(conn)?;
            student.set_courses(course_ids, conn)?;
            Ok(student)
        })
    }
}
