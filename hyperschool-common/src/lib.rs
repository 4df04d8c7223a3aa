#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod error;
pub mod forms;
pub mod render;
pub mod utils;
