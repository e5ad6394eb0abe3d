//! Persona HTTP Routes
//!
//! CRUD endpoints under `/personas`. Every id-qualified mutation is
//! preceded by a lookup so a missing record answers 404 without touching
//! the store.
//!
//! Store calls are synchronous, so each handler runs its service calls on
//! the blocking pool.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::errors::{ApiError, ApiResult};
use crate::observability::Logger;
use crate::persona::{Persona, PersonaId, PersonaRepository, PersonaService};

/// Shared state type
type ServiceState<R> = Arc<PersonaService<R>>;

/// Create persona routes
pub fn persona_routes<R: PersonaRepository + 'static>(service: ServiceState<R>) -> Router {
    Router::new()
        .route(
            "/personas",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/personas/{id}",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

/// Run `op` against the service on the blocking pool.
async fn run_blocking<R, T, F>(service: ServiceState<R>, op: F) -> ApiResult<T>
where
    R: PersonaRepository + 'static,
    T: Send + 'static,
    F: FnOnce(&PersonaService<R>) -> ApiResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&service))
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {}", e)))?
}

async fn list_handler<R: PersonaRepository + 'static>(
    State(service): State<ServiceState<R>>,
) -> ApiResult<Json<Vec<Persona>>> {
    let personas = run_blocking(service, |s| Ok(s.get_all_personas()?)).await?;
    Ok(Json(personas))
}

async fn get_handler<R: PersonaRepository + 'static>(
    State(service): State<ServiceState<R>>,
    Path(id): Path<PersonaId>,
) -> ApiResult<Json<Persona>> {
    let persona = run_blocking(service, move |s| {
        s.get_persona_by_id(id)?.ok_or(ApiError::NotFound)
    })
    .await?;
    Ok(Json(persona))
}

async fn create_handler<R: PersonaRepository + 'static>(
    State(service): State<ServiceState<R>>,
    Json(persona): Json<Persona>,
) -> ApiResult<(StatusCode, Json<Persona>)> {
    // A client-supplied id never selects an existing row.
    let persona = persona.without_id();
    let saved = run_blocking(service, move |s| Ok(s.save_persona(&persona)?)).await?;

    let id = saved.id.map(|id| id.to_string()).unwrap_or_default();
    Logger::info("PERSONA_CREATED", &[("id", id.as_str())]);

    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_handler<R: PersonaRepository + 'static>(
    State(service): State<ServiceState<R>>,
    Path(id): Path<PersonaId>,
    Json(details): Json<Persona>,
) -> ApiResult<Json<Persona>> {
    let updated = run_blocking(service, move |s| {
        let mut existing = s.get_persona_by_id(id)?.ok_or(ApiError::NotFound)?;
        existing.apply_details(details);
        // Lookup and save lock separately: a delete landing in between makes
        // the save insert a fresh row under a new id (last write wins).
        Ok(s.save_persona(&existing)?)
    })
    .await?;

    Logger::info("PERSONA_UPDATED", &[("id", id.to_string().as_str())]);
    Ok(Json(updated))
}

async fn delete_handler<R: PersonaRepository + 'static>(
    State(service): State<ServiceState<R>>,
    Path(id): Path<PersonaId>,
) -> ApiResult<StatusCode> {
    run_blocking(service, move |s| {
        s.get_persona_by_id(id)?.ok_or(ApiError::NotFound)?;
        Ok(s.delete_persona(id)?)
    })
    .await?;

    Logger::info("PERSONA_DELETED", &[("id", id.to_string().as_str())]);
    Ok(StatusCode::NO_CONTENT)
}
