use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Schema migrations embedded from `migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Translate SQLAlchemy-style SQLite URLs into the form sqlx expects.
///
/// `sqlite:///site.db` names a path relative to the working directory and
/// `sqlite:////var/lib/site.db` an absolute one; sqlx reads everything after
/// `sqlite://` as the path, so one slash is dropped. Other URLs pass through.
pub fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix("sqlite:///") {
        Some(path) => format!("sqlite://{path}"),
        None => url.to_string(),
    }
}

/// Open a connection pool.
///
/// The server connects with `create_if_missing = false`: the schema is
/// provisioned beforehand by `fintrack-admin migrate`.
pub async fn connect(database_url: &str, create_if_missing: bool) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&normalize_database_url(database_url))?
        .create_if_missing(create_if_missing);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(options)
        .await
}

/// Apply pending migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    // A single, never-recycled connection keeps the in-memory database alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}
