use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Opens the connection pool eagerly: at least one connection is established
/// before this returns, so an unreachable database is observed here, before
/// any listening socket exists.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}
