use connection::PgPool;
use hyperschool_common::error::{AppError, AppResult};

#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

embed_migrations!();

pub fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let conn = connection::get_conn(pool)?;
    embedded_migrations::run(&conn).map_err(|e| AppError::Database(e.to_string()))?;
    log::info!("database migrations are up to date");
    Ok(())
}

pub mod connection;
pub mod models;
pub mod schema;
