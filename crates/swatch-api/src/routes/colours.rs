//! Item list handlers: show a person's items and add, edit, or delete them.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use swatch_core::ITEM_LIST_LIMIT;
use swatch_session::Session;

use super::{to_dashboard, to_list};
use crate::error::ApiError;
use crate::params::{
    AddColourForm, EditColourForm, IdQuery, parse_item_id, parse_person_id, present,
    resolve_owner,
};
use crate::state::AppState;
use crate::views;

/// `GET /personsColours?id=`
///
/// Also records the person as the session's current person.
pub async fn persons_colours(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<IdQuery>,
) -> Result<Response, ApiError> {
    let Some(raw) = present(query.id) else {
        return Ok(to_dashboard().into_response());
    };
    let id = parse_person_id(&raw)?;

    let Some(person) = state.store.get_person(id).await? else {
        tracing::debug!(person_id = %id, "List requested for unknown person");
        return Ok(to_dashboard().into_response());
    };

    session.set_current_person_id(person.id);
    let items = state.store.list_items(person.id, ITEM_LIST_LIMIT).await?;
    Ok(views::persons_colours(&person, &items).into_response())
}

/// `POST /addColour`
pub async fn add_colour(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddColourForm>,
) -> Result<Response, ApiError> {
    let owner = resolve_owner(form.owner, &session)?;
    let Some(value) = present(form.colour) else {
        return Ok(to_list(owner).into_response());
    };
    let Some(owner) = owner else {
        tracing::debug!("Add colour without a selected person");
        return Ok(to_dashboard().into_response());
    };
    if state.store.get_person(owner).await?.is_none() {
        tracing::debug!(person_id = %owner, "Add colour for missing person");
        return Ok(to_dashboard().into_response());
    }

    let item = state.store.insert_item(owner, &value).await?;
    tracing::info!(item_id = %item.id, person_id = %owner, "Added colour");
    Ok(to_list(Some(owner)).into_response())
}

/// `POST /editColour`
///
/// Changes only the item's value.
pub async fn edit_colour(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<EditColourForm>,
) -> Result<Response, ApiError> {
    let owner = resolve_owner(form.owner, &session)?;
    let Some(raw) = present(form.id) else {
        return Ok(to_list(owner).into_response());
    };
    let id = parse_item_id(&raw)?;
    let Some(value) = present(form.colour_field) else {
        return Ok(to_list(owner).into_response());
    };

    let Some(item) = state.store.get_item(id).await? else {
        tracing::debug!(item_id = %id, "Edit for missing colour");
        return Ok(to_list(owner).into_response());
    };

    state.store.update_item_value(id, &value).await?;
    tracing::info!(item_id = %id, "Edited colour");
    Ok(to_list(Some(item.owner_id)).into_response())
}

/// `GET /deleteColour?id=`
///
/// Deleting an item that is already gone is not an error. Without a known,
/// existing owner nothing is deleted.
pub async fn delete_colour(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<IdQuery>,
) -> Result<Response, ApiError> {
    let owner = resolve_owner(query.owner, &session)?;
    let Some(raw) = present(query.id) else {
        return Ok(to_list(owner).into_response());
    };
    let id = parse_item_id(&raw)?;

    let Some(owner) = owner else {
        tracing::debug!(item_id = %id, "Delete colour without a selected person");
        return Ok(to_dashboard().into_response());
    };
    if state.store.get_person(owner).await?.is_none() {
        tracing::debug!(person_id = %owner, "Delete colour for missing person");
        return Ok(to_dashboard().into_response());
    }

    let removed = state.store.remove_item(id).await?;
    tracing::info!(item_id = %id, removed, "Deleted colour");
    Ok(to_list(Some(owner)).into_response())
}
