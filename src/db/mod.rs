//! SQLite connection bootstrap and embedded schema
//!
//! A connection handed out by this module has its busy timeout set and
//! the schema fully applied. Nothing reads or writes persona rows before
//! that.

mod migrations;
mod open;

use thiserror::Error;

pub use migrations::{apply_migrations, latest_version};
pub use open::{open_db, open_db_in_memory, IN_MEMORY_PATH};

/// Result type for database bootstrap
pub type DbResult<T> = Result<T, DbError>;

/// Database bootstrap errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Underlying SQLite failure
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The file was written by a newer build
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
}
