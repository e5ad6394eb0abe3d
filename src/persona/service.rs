//! Persona use-case service
//!
//! Forwards every call to the repository unchanged. The service exists so
//! HTTP handlers never depend on the storage technology.

use super::model::{Persona, PersonaId};
use super::repository::{PersonaRepository, RepoResult};

/// Pass-through service over a persona repository
pub struct PersonaService<R: PersonaRepository> {
    repo: R,
}

impl<R: PersonaRepository> PersonaService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_all_personas(&self) -> RepoResult<Vec<Persona>> {
        self.repo.find_all()
    }

    pub fn get_persona_by_id(&self, id: PersonaId) -> RepoResult<Option<Persona>> {
        self.repo.find_by_id(id)
    }

    /// Create or replace, keyed by `persona.id`.
    pub fn save_persona(&self, persona: &Persona) -> RepoResult<Persona> {
        self.repo.save(persona)
    }

    pub fn delete_persona(&self, id: PersonaId) -> RepoResult<()> {
        self.repo.delete_by_id(id)
    }
}
