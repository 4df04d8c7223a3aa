use std::sync::Arc;

use actix_cors::Cors;
use actix_web::web;
use async_graphql::{dataloader::DataLoader, Context, EmptySubscription, Schema};
use models::{AppSchema, Mutation, Query, TeacherLoader};

use hyperschool_db::connection::{get_conn, Conn, PgPool};

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/graphql")
            .wrap(Cors::permissive())
            .route(web::post().to(handlers::index))
            .route(web::get().to(handlers::index_playground)),
    );
}

pub fn create_schema_with_context(pool: PgPool) -> AppSchema {
    let arc_pool = Arc::new(pool);
    let teacher_loader = DataLoader::new(TeacherLoader {
        pool: arc_pool.clone(),
    })
    .max_batch_size(10);

    Schema::build(Query, Mutation, EmptySubscription)
        .data(arc_pool)
        .data(teacher_loader)
        .finish()
}

pub(crate) fn get_conn_from_ctx(ctx: &Context<'_>) -> async_graphql::Result<Conn> {
    let pool = ctx.data::<Arc<PgPool>>()?;
    Ok(get_conn(pool)?)
}

mod handlers;
pub mod models;
