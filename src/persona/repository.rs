//! Persistence contract for personas

use thiserror::Error;

use super::model::{Persona, PersonaId};
use crate::db::DbError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Failures coming out of the store
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("store bootstrap error: {0}")]
    Bootstrap(#[from] DbError),

    /// A previous holder of the connection panicked
    #[error("store connection lock poisoned")]
    LockPoisoned,

    #[error("invalid persisted persona data: {0}")]
    InvalidData(String),
}

/// Key-based CRUD over the persona store.
///
/// Implementations are shared across request tasks.
pub trait PersonaRepository: Send + Sync {
    /// Every stored persona, ordered by id.
    fn find_all(&self) -> RepoResult<Vec<Persona>>;

    /// The persona with `id`, or `None` when absent.
    fn find_by_id(&self, id: PersonaId) -> RepoResult<Option<Persona>>;

    /// Replace the record keyed by `persona.id` when it exists, otherwise
    /// insert a new record with a fresh id. Returns the stored record.
    fn save(&self, persona: &Persona) -> RepoResult<Persona>;

    /// Remove the record with `id`. Absent ids are a no-op.
    fn delete_by_id(&self, id: PersonaId) -> RepoResult<()>;
}
