//! Dashboard handlers: list, create, and delete persons.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use swatch_core::DASHBOARD_LIMIT;
use swatch_session::Session;

use super::to_dashboard;
use crate::error::ApiError;
use crate::params::{AddPersonForm, IdQuery, parse_person_id, present};
use crate::state::AppState;
use crate::views;

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Result<Response, ApiError> {
    let persons = state.store.list_persons(DASHBOARD_LIMIT).await?;
    Ok(views::dashboard(&persons).into_response())
}

/// `POST /addPerson`
///
/// With `action=copy` the name is parked in the session and the copy-source
/// picker is shown instead of creating the person.
pub async fn add_person(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddPersonForm>,
) -> Result<Response, ApiError> {
    let wants_copy = form.wants_copy();
    let Some(name) = present(form.person) else {
        return Ok(to_dashboard().into_response());
    };

    if wants_copy {
        tracing::debug!(name = %name, "Starting copy-list flow");
        session.set_pending_new_list_name(name.clone());
        let persons = state.store.list_persons(DASHBOARD_LIMIT).await?;
        return Ok(views::copy_picker(&persons, Some(&name)).into_response());
    }

    let person = state.store.insert_person(&name).await?;
    tracing::info!(person_id = %person.id, name = %person.name, "Created person");
    Ok(to_dashboard().into_response())
}

/// `GET /deletePerson?id=`
///
/// Removes the person and every item it owns.
pub async fn delete_person(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response, ApiError> {
    let Some(raw) = present(query.id) else {
        return Ok(to_dashboard().into_response());
    };
    let id = parse_person_id(&raw)?;

    let removed = state.store.remove_person(id).await?;
    tracing::info!(
        person_id = %id,
        person_removed = removed.person_removed,
        items_removed = removed.items_removed,
        "Deleted person"
    );
    Ok(to_dashboard().into_response())
}
