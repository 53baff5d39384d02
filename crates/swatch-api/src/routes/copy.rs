//! Copy-list handlers.
//!
//! The flow spans three requests: `POST /addPerson` with `action=copy`
//! parks the new list's name in the session, the picker chooses a source,
//! and `POST /copyList` creates the new person with the source's values.

use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use swatch_core::{COPY_LIMIT, DASHBOARD_LIMIT};
use swatch_session::Session;

use super::{to_dashboard, to_list};
use crate::error::ApiError;
use crate::params::{CopyListForm, parse_person_id, present};
use crate::state::AppState;
use crate::views;

/// `GET /pickCopyList`
pub async fn pick_copy_list(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, ApiError> {
    let persons = state.store.list_persons(DASHBOARD_LIMIT).await?;
    let pending = session.snapshot().pending_new_list_name;
    Ok(views::copy_picker(&persons, pending.as_deref()).into_response())
}

/// `POST /copyList`
///
/// Always ends in a single redirect: to the new list, or back to the
/// picker or dashboard when there is nothing to copy into. The pending
/// name is cleared only once the new list exists, so a failed copy can be
/// retried.
pub async fn copy_list(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CopyListForm>,
) -> Result<Response, ApiError> {
    let Some(raw) = present(form.person) else {
        return Ok(Redirect::to("/pickCopyList").into_response());
    };
    let source = parse_person_id(&raw)?;

    let Some(name) = session.snapshot().pending_new_list_name else {
        tracing::debug!("Copy requested without a pending list name");
        return Ok(to_dashboard().into_response());
    };

    let values: Vec<String> = state
        .store
        .list_items(source, COPY_LIMIT)
        .await?
        .into_iter()
        .map(|item| item.value)
        .collect();

    let (person, items) = state.store.create_person_with_items(&name, &values).await?;
    session.take_pending_new_list_name();
    tracing::info!(
        source_id = %source,
        person_id = %person.id,
        copied = items.len(),
        "Copied list"
    );
    Ok(to_list(Some(person.id)).into_response())
}
