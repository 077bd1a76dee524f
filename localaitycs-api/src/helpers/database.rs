use crate::storage::migrations::run_migrations;
use crate::DbConnection;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

const IN_MEMORY: &str = ":memory:";

/// Open the submissions database, recreating it when the file is unreadable,
/// and bring the schema up to date.
pub fn initialize_database(db_path: &Path) -> anyhow::Result<DbConnection> {
    let in_memory = db_path.as_os_str() == IN_MEMORY;

    if !in_memory {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        discard_if_corrupted(db_path)?;
    }

    let mut conn = Connection::open(db_path)?;
    run_migrations(&mut conn)?;

    info!(path = %db_path.display(), "Database initialized successfully");
    Ok(Arc::new(Mutex::new(conn)))
}

/// Remove an existing database file that SQLite cannot read.
fn discard_if_corrupted(db_path: &Path) -> anyhow::Result<()> {
    if !db_path.exists() {
        return Ok(());
    }

    // `SELECT 1` never reads the file header; the schema table does.
    let healthy = Connection::open(db_path).and_then(|conn| {
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
    });

    if let Err(e) = healthy {
        warn!(error = %e, path = %db_path.display(), "Database corrupted, recreating");
        std::fs::remove_file(db_path)?;
    }

    Ok(())
}
