pub mod error;
pub mod genre;
pub mod movie;

pub use error::{DataAccessError, Error};
pub use sqlx::Error as SqlxError;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::debug;

use crate::error::{Result, WithContext as _};

pub type ChosenDB = sqlx::Sqlite;
pub type ChosenRow = sqlx::sqlite::SqliteRow;
pub type Pool = sqlx::Pool<ChosenDB>;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 50;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub async fn new_pool(database_url: &str) -> Result<Pool> {
    new_pool_with_size(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Foreign keys are switched on for every connection, otherwise sqlite
/// would accept movies pointing to non-existent genres.
pub async fn new_pool_with_size(database_url: &str, max_connections: u32) -> Result<Pool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()
        .with_context(|| format!("parsing database url {database_url}"))?
        .foreign_keys(true)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("connecting to {database_url}"))?;
    debug!("Connected to {database_url} (max {max_connections} connections)");
    Ok(pool)
}

/// Creates `genre` and `movie` tables if they are not there yet.
pub async fn init_schema(pool: &Pool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
