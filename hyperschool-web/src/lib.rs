use actix_web::web;

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::index)
        .service(handlers::course_list)
        .service(handlers::course_details)
        .service(handlers::teacher_details)
        .service(handlers::add_course_page)
        .service(handlers::add_course);
}

pub mod forms;
mod handlers;
