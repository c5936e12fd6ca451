use sqlx::SqliteConnection;

use super::models::{Entry, EntryKind, NewEntry};
use crate::errors::AppError;

/// Repository functions for the expense and income tables.
///
/// Every function takes the caller's connection, which may be a pooled
/// connection or an open transaction; committing is left to the caller.
pub struct EntryService;

impl EntryService {
    /// Insert a new entry and return the stored row with its assigned id
    pub async fn insert(
        conn: &mut SqliteConnection,
        kind: EntryKind,
        entry: &NewEntry,
    ) -> Result<Entry, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, amount, date) VALUES (?, ?, ?) RETURNING id, name, amount, date",
            kind.table()
        );

        sqlx::query_as::<_, Entry>(&sql)
            .bind(&entry.name)
            .bind(entry.amount)
            .bind(entry.date)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// All entries of one kind in insertion order
    pub async fn list_all(conn: &mut SqliteConnection, kind: EntryKind) -> Result<Vec<Entry>, AppError> {
        let sql = format!(
            "SELECT id, name, amount, date FROM {} ORDER BY id ASC",
            kind.table()
        );

        sqlx::query_as::<_, Entry>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    pub async fn count(conn: &mut SqliteConnection, kind: EntryKind) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());

        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }
}
