//! Small standalone exercises served next to the schedule: ISO week
//! numbers, a date-shape matcher and a process-wide todo list.

use actix_web::web;

pub mod date_match;
pub mod todo;
pub mod week;

pub use week::week_number;

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    cfg.service(todo::add_todo).service(todo::list_todos);
}
