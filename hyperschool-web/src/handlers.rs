use actix_web::{get, post, web, HttpRequest, HttpResponse};
use hyperschool_common::error::AppResult;
use hyperschool_common::forms::FormErrors;
use hyperschool_common::render::{page_context, redirect, render};
use hyperschool_db::connection::{get_conn, PgPool};
use hyperschool_db::models::course::Course;
use hyperschool_db::models::student::Student;
use hyperschool_db::models::teacher::Teacher;

use crate::forms::{SearchInput, StudentRegisterInput};

const ADD_COURSE_TEMPLATE: &str = "schedule/add_course.html";

#[get("/")]
pub(crate) async fn index() -> HttpResponse {
    redirect("/schedule/main/")
}

#[get("/schedule/main/")]
pub(crate) async fn course_list(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    search: web::Query<SearchInput>,
) -> AppResult<HttpResponse> {
    let search = search.into_inner();
    let q = search.q.clone();
    let course_list = web::block(move || -> AppResult<Vec<Course>> {
        Ok(Course::search_or_all(&q, &*get_conn(&pool)?)?)
    })
    .await?;

    let mut ctx = page_context(&req);
    ctx.insert("q", &search.q);
    ctx.insert("errors", &search.errors());
    ctx.insert("course_list", &course_list);
    render("schedule/index.html", &ctx)
}

#[get("/schedule/course_details/{id}")]
pub(crate) async fn course_details(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    web::Path(id): web::Path<i32>,
) -> AppResult<HttpResponse> {
    let (course, teachers, students) =
        web::block(move || -> AppResult<(Course, Vec<Teacher>, Vec<Student>)> {
            let conn = get_conn(&pool)?;
            let course = Course::find(id, &conn)?;
            let teachers = course.teachers(&conn)?;
            let students = course.students(&conn)?;
            Ok((course, teachers, students))
        })
        .await?;

    let mut ctx = page_context(&req);
    ctx.insert("course", &course);
    ctx.insert("teachers", &teachers);
    ctx.insert("students", &students);
    render("schedule/course.html", &ctx)
}

#[get("/schedule/teacher_details/{id}")]
pub(crate) async fn teacher_details(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    web::Path(id): web::Path<i32>,
) -> AppResult<HttpResponse> {
    let (teacher, courses) = web::block(move || -> AppResult<(Teacher, Vec<Course>)> {
        let conn = get_conn(&pool)?;
        let teacher = Teacher::find(id, &conn)?;
        let courses = teacher.courses(&conn)?;
        Ok((teacher, courses))
    })
    .await?;

    let mut ctx = page_context(&req);
    ctx.insert("teacher", &teacher);
    ctx.insert("courses", &courses);
    render("schedule/teacher.html", &ctx)
}

fn render_registration(
    req: &HttpRequest,
    form: &StudentRegisterInput,
    errors: &FormErrors,
    courses: &[Course],
    saved: Option<&Student>,
) -> AppResult<HttpResponse> {
    let mut ctx = page_context(req);
    ctx.insert("form", form);
    ctx.insert("errors", errors);
    ctx.insert("courses", courses);
    ctx.insert("selected_course", &form.selected_course().unwrap_or(0));
    if let Some(student) = saved {
        ctx.insert("saved", student);
    }
    render(ADD_COURSE_TEMPLATE, &ctx)
}

#[get("/schedule/add_course/")]
pub(crate) async fn add_course_page(
    req: HttpRequest,
    pool: web::Data<PgPool>,
) -> AppResult<HttpResponse> {
    let courses = web::block(move || -> AppResult<Vec<Course>> {
        Ok(Course::list_all(&*get_conn(&pool)?)?)
    })
    .await?;
    render_registration(
        &req,
        &StudentRegisterInput::default(),
        &FormErrors::new(),
        &courses,
        None,
    )
}

#[post("/schedule/add_course/")]
pub(crate) async fn add_course(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    form: web::Form<StudentRegisterInput>,
) -> AppResult<HttpResponse> {
    let input = form.into_inner();
    let (courses, outcome, input) = web::block(
        move || -> AppResult<(Vec<Course>, Result<Student, FormErrors>, StudentRegisterInput)> {
            let conn = get_conn(&pool)?;
            let courses = Course::list_all(&conn)?;
            let outcome = match input.clean(&courses) {
                Ok(reg) => Ok(reg.student.register(&[reg.course_id], &conn)?),
                Err(errors) => Err(errors),
            };
            Ok((courses, outcome, input))
        },
    )
    .await?;

    match outcome {
        Ok(student) => {
            log::info!(
                "registered student {} {} (id {})",
                student.name,
                student.surname,
                student.id
            );
            render_registration(&req, &input, &FormErrors::new(), &courses, Some(&student))
        }
        Err(errors) => render_registration(&req, &input, &errors, &courses, None),
    }
}
