use hyperschool_common::forms::{
    char_field, integer_field, FormErrors, INVALID_CHOICE, REQUIRED,
};
use hyperschool_db::models::course::Course;
use hyperschool_db::models::student::NewStudent;
use serde::{Deserialize, Serialize};

pub const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchInput {
    pub q: String,
}

impl SearchInput {
    /// Errors only for a query with some text; a blank one is an unbound form.
    pub fn errors(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if !self.q.trim().is_empty() {
            char_field(&mut errors, "q", &self.q, NAME_MAX_LENGTH);
        }
        errors
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StudentRegisterInput {
    pub name: String,
    pub surname: String,
    pub age: String,
    pub course: String,
}

#[derive(Debug, PartialEq)]
pub struct StudentRegistration {
    pub student: NewStudent,
    pub course_id: i32,
}

impl StudentRegisterInput {
    /// `courses` are the available choices for the `course` field.
    pub fn clean(&self, courses: &[Course]) -> Result<StudentRegistration, FormErrors> {
        let mut errors = FormErrors::new();
        let name = char_field(&mut errors, "name", &self.name, NAME_MAX_LENGTH);
        let surname = char_field(&mut errors, "surname", &self.surname, NAME_MAX_LENGTH);
        let age = integer_field(&mut errors, "age", &self.age);
        let course_id = course_choice(&mut errors, &self.course, courses);

        match (name, surname, age, course_id) {
            (Some(name), Some(surname), Some(age), Some(course_id)) => Ok(StudentRegistration {
                student: NewStudent { name, surname, age },
                course_id,
            }),
            _ => Err(errors),
        }
    }

    /// Id of the chosen course when it parses, for re-selecting it.
    pub fn selected_course(&self) -> Option<i32> {
        self.course.trim().parse().ok()
    }
}

fn course_choice(errors: &mut FormErrors, raw: &str, courses: &[Course]) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add("course", REQUIRED);
        return None;
    }
    match raw.parse::<i32>() {
        Ok(id) if courses.iter().any(|c| c.id == id) => Some(id),
        _ => {
            errors.add("course", INVALID_CHOICE);
            None
        }
    }
}
