use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend};
use tracing::{info, warn};

use crate::config::db::is_in_memory;
use crate::error::AppError;

const MAX_CONNECTIONS: u32 = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(8);

/// Open a pooled connection. Does not run migrations.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_owned());
    if is_in_memory(url) {
        // Each pooled connection would otherwise open its own empty database.
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(MAX_CONNECTIONS);
    }
    opts.connect_timeout(CONNECT_TIMEOUT).sqlx_logging(false);

    let conn = Database::connect(opts).await.map_err(|e| {
        warn!(error = %e, "database connect failed");
        AppError::db_unavailable()
    })?;

    if conn.get_database_backend() == DbBackend::Sqlite {
        // Cascading deletes depend on it.
        conn.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
    }

    info!(backend = ?conn.get_database_backend(), "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(url).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use migration::count_applied_migrations;

    use super::*;

    #[tokio::test]
    async fn bootstrap_in_memory_applies_migrations() {
        let conn = bootstrap_db("sqlite::memory:").await.unwrap();
        assert!(count_applied_migrations(&conn).await.unwrap() >= 1);

        // Idempotent
        migrate(&conn, MigrationCommand::Up).await.unwrap();
    }
}
