//! # Persona
//!
//! The single managed entity and its two lower layers:
//!
//! - [`PersonaRepository`] - key-based persistence contract
//! - [`SqlitePersonaRepository`] - the SQLite implementation
//! - [`PersonaService`] - pass-through delegate used by the HTTP handlers

mod model;
mod repository;
mod service;
mod sqlite;

pub use model::{Persona, PersonaId};
pub use repository::{PersonaRepository, RepoError, RepoResult};
pub use service::PersonaService;
pub use sqlite::SqlitePersonaRepository;
