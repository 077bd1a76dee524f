pub mod migrations;
pub mod sqlite;

pub use sqlite::SqliteRecordStore;
