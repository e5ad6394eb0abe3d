//! Opening file-backed and in-memory stores

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use super::migrations::apply_migrations;
use super::DbResult;
use crate::observability::OperationScope;

/// Path value that selects an ephemeral in-memory store
pub const IN_MEMORY_PATH: &str = ":memory:";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a SQLite file, creating it if needed, and apply the schema.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let scope = OperationScope::new("DB_OPEN", &[("mode", "file"), ("path", display.as_str())]);

    match Connection::open(path)
        .map_err(Into::into)
        .and_then(bootstrap)
    {
        Ok(conn) => {
            scope.complete();
            Ok(conn)
        }
        Err(err) => {
            scope.fail(&err.to_string());
            Err(err)
        }
    }
}

/// Open a private in-memory database and apply the schema.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let scope = OperationScope::new("DB_OPEN", &[("mode", "memory")]);

    match Connection::open_in_memory()
        .map_err(Into::into)
        .and_then(bootstrap)
    {
        Ok(conn) => {
            scope.complete();
            Ok(conn)
        }
        Err(err) => {
            scope.fail(&err.to_string());
            Err(err)
        }
    }
}

fn bootstrap(mut conn: Connection) -> DbResult<Connection> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_file_creates_schema() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("personas.db");

        let conn = open_db(&path).unwrap();
        assert!(path.exists());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM persona", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("personas.db");

        {
            let conn = open_db(&path).unwrap();
            conn.execute(
                "INSERT INTO persona (nombre, apellido, edad) VALUES ('Ana', 'Diaz', 41)",
                [],
            )
            .unwrap();
        }

        let conn = open_db(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM persona", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_open_in_memory() {
        let conn = open_db_in_memory().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM persona", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
