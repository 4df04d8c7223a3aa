//! Runs against a live PostgreSQL named by `DATABASE_URL`:
//! `cargo test -p hyperschool-web -- --ignored`.
//! Rows created here are committed; names carry a per-run suffix.

use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::{http::StatusCode, test, App};
use hyperschool_db::connection::{create_connection_pool, get_conn, PgPool};
use hyperschool_db::models::course::Course;
use hyperschool_db::models::student::NewStudent;
use hyperschool_db::models::teacher::Teacher;
use hyperschool_db::run_migrations;

fn pool() -> PgPool {
    dotenv::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = create_connection_pool(&url).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    pool
}

fn suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}", nanos % 1_000_000_000_000)
}

/// A seeded course that has at least one teacher.
fn taught_course(pool: &PgPool) -> (Course, Vec<Teacher>) {
    let conn = get_conn(pool).expect("Can't get DB connection");
    Course::list_all(&conn)
        .expect("Failed to list courses")
        .into_iter()
        .find_map(|course| {
            let teachers = course.teachers(&conn).ok()?;
            if teachers.is_empty() {
                None
            } else {
                Some((course, teachers))
            }
        })
        .expect("no course with teachers; seed migration missing?")
}

#[actix_rt::test]
#[ignore]
async fn course_details_lists_teachers_and_students() {
    let pool = pool();
    let (course, teachers) = taught_course(&pool);
    let surname = format!("Lovelace{}", suffix());
    NewStudent {
        name: "Ada".into(),
        surname: surname.clone(),
        age: 36,
    }
    .register(&[course.id], &get_conn(&pool).unwrap())
    .unwrap();

    let mut app = test::init_service(
        App::new()
            .data(pool.clone())
            .configure(hyperschool_web::configure_service),
    )
    .await;
    let req = test::TestRequest::get()
        .uri(&format!("/schedule/course_details/{}", course.id))
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains(&course.title));
    for teacher in &teachers {
        assert!(html.contains(&format!(
            r#"href="/schedule/teacher_details/{}""#,
            teacher.id
        )));
    }
    assert!(html.contains(&format!("Ada {}", surname)));
}

#[actix_rt::test]
#[ignore]
async fn teacher_details_lists_courses() {
    let pool = pool();
    let (course, teachers) = taught_course(&pool);

    let mut app = test::init_service(
        App::new()
            .data(pool.clone())
            .configure(hyperschool_web::configure_service),
    )
    .await;
    let req = test::TestRequest::get()
        .uri(&format!("/schedule/teacher_details/{}", teachers[0].id))
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains(&teachers[0].surname));
    assert!(html.contains(&format!(r#"href="/schedule/course_details/{}""#, course.id)));
}

#[actix_rt::test]
#[ignore]
async fn missing_records_are_not_found() {
    let mut app = test::init_service(
        App::new()
            .data(pool())
            .configure(hyperschool_web::configure_service),
    )
    .await;
    for uri in &[
        "/schedule/course_details/2147483647",
        "/schedule/teacher_details/2147483647",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_rt::test]
#[ignore]
async fn invalid_registration_keeps_the_bound_form() {
    let pool = pool();
    let (course, _) = taught_course(&pool);
    let course_id = course.id.to_string();

    let mut app = test::init_service(
        App::new()
            .data(pool.clone())
            .configure(hyperschool_web::configure_service),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/schedule/add_course/")
        .set_form(&[
            ("name", "Ada"),
            ("surname", "Lovelace"),
            ("age", "thirty-six"),
            ("course", course_id.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("<li>Enter a whole number.</li>"));
    assert!(html.contains(r#"value="Lovelace""#));
    assert!(html.contains(&format!(r#"<option value="{}" selected>"#, course.id)));
    assert!(!html.contains("was registered."));
}

#[actix_rt::test]
#[ignore]
async fn valid_registration_enrolls_the_student() {
    let pool = pool();
    let (course, _) = taught_course(&pool);
    let course_id = course.id.to_string();
    let surname = format!("Turing{}", suffix());

    let mut app = test::init_service(
        App::new()
            .data(pool.clone())
            .configure(hyperschool_web::configure_service),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/schedule/add_course/")
        .set_form(&[
            ("name", " Alan "),
            ("surname", surname.as_str()),
            ("age", "41"),
            ("course", course_id.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains(&format!("Alan {} was registered.", surname)));

    let conn = get_conn(&pool).unwrap();
    let enrolled = course.students(&conn).unwrap();
    let student = enrolled
        .iter()
        .find(|s| s.surname == surname)
        .expect("student not enrolled");
    assert_eq!(student.name, "Alan");
    assert_eq!(student.courses(&conn).unwrap(), vec![course]);
}
