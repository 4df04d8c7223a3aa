pub mod course;
pub mod student;
pub mod teacher;
pub mod user;
