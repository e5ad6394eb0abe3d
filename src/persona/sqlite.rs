//! SQLite-backed persona repository

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::model::{Persona, PersonaId};
use super::repository::{PersonaRepository, RepoError, RepoResult};
use crate::db::{open_db, open_db_in_memory};

const PERSONA_SELECT_SQL: &str = "SELECT id, nombre, apellido, edad FROM persona";

/// Persona repository over a single SQLite connection.
///
/// The connection is guarded by a mutex; each call holds it for one
/// statement sequence only.
pub struct SqlitePersonaRepository {
    conn: Mutex<Connection>,
}

impl SqlitePersonaRepository {
    /// Wrap a connection that already has the schema applied.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Fresh private in-memory store.
    pub fn in_memory() -> RepoResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepoError::LockPoisoned)
    }
}

impl PersonaRepository for SqlitePersonaRepository {
    fn find_all(&self) -> RepoResult<Vec<Persona>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{PERSONA_SELECT_SQL} ORDER BY id"))?;
        let personas = stmt
            .query_map([], map_persona_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(personas)
    }

    fn find_by_id(&self, id: PersonaId) -> RepoResult<Option<Persona>> {
        let conn = self.lock()?;
        select_by_id(&conn, id)
    }

    fn save(&self, persona: &Persona) -> RepoResult<Persona> {
        let conn = self.lock()?;

        let updated = match persona.id {
            Some(id) => conn.execute(
                "UPDATE persona SET nombre = ?1, apellido = ?2, edad = ?3 WHERE id = ?4",
                params![persona.nombre, persona.apellido, persona.edad, id],
            )?,
            None => 0,
        };

        let id = match persona.id {
            Some(id) if updated > 0 => id,
            _ => {
                conn.execute(
                    "INSERT INTO persona (nombre, apellido, edad) VALUES (?1, ?2, ?3)",
                    params![persona.nombre, persona.apellido, persona.edad],
                )?;
                conn.last_insert_rowid()
            }
        };

        select_by_id(&conn, id)?
            .ok_or_else(|| RepoError::InvalidData(format!("persona {id} missing after write")))
    }

    fn delete_by_id(&self, id: PersonaId) -> RepoResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM persona WHERE id = ?1", params![id])?;
        Ok(())
    }
}

fn select_by_id(conn: &Connection, id: PersonaId) -> RepoResult<Option<Persona>> {
    Ok(conn
        .query_row(
            &format!("{PERSONA_SELECT_SQL} WHERE id = ?1"),
            params![id],
            map_persona_row,
        )
        .optional()?)
}

fn map_persona_row(row: &Row<'_>) -> rusqlite::Result<Persona> {
    Ok(Persona {
        id: Some(row.get("id")?),
        nombre: row.get("nombre")?,
        apellido: row.get("apellido")?,
        edad: row.get("edad")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> SqlitePersonaRepository {
        SqlitePersonaRepository::in_memory().unwrap()
    }

    #[test]
    fn test_save_without_id_assigns_one() {
        let repo = repo();
        let saved = repo.save(&Persona::new("Juan", "Perez", 30)).unwrap();

        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.nombre.as_deref(), Some("Juan"));
        assert_eq!(repo.find_by_id(1).unwrap(), Some(saved));
    }

    #[test]
    fn test_save_with_existing_id_replaces() {
        let repo = repo();
        let mut saved = repo.save(&Persona::new("Juan", "Perez", 30)).unwrap();

        saved.edad = 31;
        saved.apellido = None;
        let updated = repo.save(&saved).unwrap();

        assert_eq!(updated, saved);
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_save_with_unknown_id_inserts_fresh() {
        let repo = repo();
        let mut ghost = Persona::new("Ana", "Diaz", 22);
        ghost.id = Some(500);

        let saved = repo.save(&ghost).unwrap();
        assert_ne!(saved.id, Some(500));
        assert_eq!(repo.find_by_id(500).unwrap(), None);
    }

    /// A record read, then deleted, then saved comes back as a new row.
    #[test]
    fn test_save_after_concurrent_delete_reinserts() {
        let repo = repo();
        let mut loaded = repo.save(&Persona::new("Juan", "Perez", 30)).unwrap();
        let old_id = loaded.id.unwrap();

        repo.delete_by_id(old_id).unwrap();
        loaded.edad = 31;
        let saved = repo.save(&loaded).unwrap();

        assert_ne!(saved.id, Some(old_id));
        assert_eq!(saved.edad, 31);
        assert_eq!(repo.find_by_id(old_id).unwrap(), None);
        assert_eq!(repo.find_all().unwrap(), vec![saved]);
    }

    #[test]
    fn test_find_by_id_absent() {
        assert_eq!(repo().find_by_id(42).unwrap(), None);
    }

    #[test]
    fn test_delete_removes_and_ignores_absent() {
        let repo = repo();
        let saved = repo.save(&Persona::new("Juan", "Perez", 30)).unwrap();
        let id = saved.id.unwrap();

        repo.delete_by_id(id).unwrap();
        assert_eq!(repo.find_by_id(id).unwrap(), None);

        repo.delete_by_id(id).unwrap();
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let repo = repo();
        let first = repo.save(&Persona::new("A", "A", 1)).unwrap();
        repo.delete_by_id(first.id.unwrap()).unwrap();

        let second = repo.save(&Persona::new("B", "B", 2)).unwrap();
        assert!(second.id.unwrap() > first.id.unwrap());
    }

    #[test]
    fn test_find_all_ordered_by_id() {
        let repo = repo();
        for (n, age) in [("a", 1), ("b", 2), ("c", 3)] {
            repo.save(&Persona::new(n, n, age)).unwrap();
        }

        let ids: Vec<_> = repo.find_all().unwrap().iter().filter_map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
