use crate::DbConnection;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use localaitycs_dialogue::{RecordStore, StorageError};
use rusqlite::{params, Connection, ErrorCode, Row};
use shared_types::{CompleteSubmission, StoredSubmission};

/// SQLite's `CURRENT_TIMESTAMP` format, always UTC
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct SqliteRecordStore {
    connection: DbConnection,
}

impl SqliteRecordStore {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }
}

struct UserDataRow {
    id: i64,
    budget: f64,
    city: String,
    investment_type: String,
    target_audience: String,
    created_at: String,
}

impl UserDataRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            budget: row.get(1)?,
            city: row.get(2)?,
            investment_type: row.get(3)?,
            target_audience: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn into_stored(self) -> Result<StoredSubmission, StorageError> {
        Ok(StoredSubmission {
            id: self.id,
            budget: self.budget,
            city: self.city,
            investment_type: self.investment_type,
            target_audience: self.target_audience,
            created_at: parse_sqlite_timestamp(&self.created_at)?,
        })
    }
}

fn parse_sqlite_timestamp(value: &str) -> Result<DateTime<Utc>, StorageError> {
    NaiveDateTime::parse_from_str(value, SQLITE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc)))
        .map_err(|e| {
            StorageError::OperationFailed(format!("Invalid created_at '{}': {}", value, e))
        })
}

fn map_sqlite_error(e: rusqlite::Error) -> StorageError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
            StorageError::Constraint(e.to_string())
        }
        rusqlite::Error::SqliteFailure(err, _)
            if matches!(
                err.code,
                ErrorCode::CannotOpen | ErrorCode::NotADatabase | ErrorCode::DatabaseBusy
            ) =>
        {
            StorageError::Unavailable(e.to_string())
        }
        _ => StorageError::OperationFailed(e.to_string()),
    }
}

fn fetch_by_id(conn: &Connection, id: i64) -> Result<StoredSubmission, StorageError> {
    conn.query_row(
        r#"
        SELECT id, budget, city, investment_type, target_audience, created_at
        FROM user_data
        WHERE id = ?1
        "#,
        params![id],
        UserDataRow::from_row,
    )
    .map_err(map_sqlite_error)?
    .into_stored()
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn save(&self, submission: &CompleteSubmission) -> Result<StoredSubmission, StorageError> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))?;

        conn.execute(
            r#"
            INSERT INTO user_data (budget, city, investment_type, target_audience)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                submission.budget,
                submission.city,
                submission.investment_type,
                submission.target_audience,
            ],
        )
        .map_err(map_sqlite_error)?;

        let id = conn.last_insert_rowid();
        fetch_by_id(&conn, id)
    }

    async fn list_all(&self) -> Result<Vec<StoredSubmission>, StorageError> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))?;

        let mut stmt = conn
            .prepare(
                r#"
                SELECT id, budget, city, investment_type, target_audience, created_at
                FROM user_data
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .map_err(map_sqlite_error)?;

        let rows = stmt
            .query_map([], UserDataRow::from_row)
            .map_err(map_sqlite_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_sqlite_error)?;

        rows.into_iter().map(UserDataRow::into_stored).collect()
    }
}
