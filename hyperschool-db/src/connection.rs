use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::{pg::PgConnection, r2d2::PooledConnection};
use hyperschool_common::error::{AppError, AppResult};

pub type PgPool = Pool<ConnectionManager<PgConnection>>;
pub type Conn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create_connection_pool(db_url: &str) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(db_url);
    Pool::builder().build(manager)
}

pub fn get_conn(pool: &PgPool) -> AppResult<Conn> {
    pool.get().map_err(|e| AppError::Pool(e.to_string()))
}
