use std::io;
use std::sync::Mutex;

use actix_web::{middleware::Logger, web, App, HttpServer};
use hyperschool_api::create_schema_with_context;
use hyperschool_common::config::Config;
use hyperschool_db::connection::create_connection_pool;
use hyperschool_db::run_migrations;
use hyperschool_topics::todo::TodoList;

fn startup_error<E: std::fmt::Display>(e: E) -> io::Error {
    log::error!("{}", e);
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(startup_error)?;
    let pool = create_connection_pool(&config.database_url).map_err(startup_error)?;
    run_migrations(&pool).map_err(startup_error)?;

    let schema = create_schema_with_context(pool.clone());
    let todos = web::Data::new(Mutex::new(TodoList::new()));
    let bind_address = config.bind_address.clone();
    log::info!("listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .data(pool.clone())
            .data(config.clone())
            .data(schema.clone())
            .app_data(todos.clone())
            .configure(hyperschool_api::configure_service)
            .configure(hyperschool_auth::configure_service)
            .configure(hyperschool_topics::configure_service)
            .configure(hyperschool_web::configure_service)
    })
    .bind(bind_address)?
    .run()
    .await
}
