use actix_web::web;

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::sign_up_page)
        .service(handlers::sign_up)
        .service(handlers::login_page)
        .service(handlers::login);
}

pub mod forms;
mod handlers;
