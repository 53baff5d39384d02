//! Request parameters.
//!
//! Every field is optional: a missing or empty parameter is a normal
//! outcome that handlers answer with a redirect, not an extractor rejection.

use serde::Deserialize;
use swatch_core::{ItemId, PersonId};
use swatch_session::Session;

use crate::error::ApiError;

/// `?id=` on the GET routes.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    /// Target document id
    pub id: Option<String>,
    /// Owner of the list being shown, when the page supplied it
    pub owner: Option<String>,
}

/// Body of `POST /addPerson`.
#[derive(Debug, Default, Deserialize)]
pub struct AddPersonForm {
    /// Name for the new person
    pub person: Option<String>,
    /// `copy` starts the copy-list flow; anything else adds directly
    pub action: Option<String>,
}

impl AddPersonForm {
    /// Whether the copy-list flow was requested.
    pub fn wants_copy(&self) -> bool {
        self.action.as_deref() == Some("copy")
    }
}

/// Body of `POST /addColour`.
#[derive(Debug, Default, Deserialize)]
pub struct AddColourForm {
    /// The new item's value
    pub colour: Option<String>,
    /// Owning person; falls back to the session
    pub owner: Option<String>,
}

/// Body of `POST /editColour`.
#[derive(Debug, Default, Deserialize)]
pub struct EditColourForm {
    /// Item to change
    pub id: Option<String>,
    /// Replacement value
    #[serde(rename = "colourField")]
    pub colour_field: Option<String>,
    /// Owner of the list being shown
    pub owner: Option<String>,
}

/// Body of `POST /copyList`.
#[derive(Debug, Default, Deserialize)]
pub struct CopyListForm {
    /// Source person to clone from
    pub person: Option<String>,
}

/// `Some` only for a non-empty value.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse a person id, mapping malformed input to `400`.
pub fn parse_person_id(raw: &str) -> Result<PersonId, ApiError> {
    Ok(raw.parse()?)
}

/// Parse an item id, mapping malformed input to `400`.
pub fn parse_item_id(raw: &str) -> Result<ItemId, ApiError> {
    Ok(raw.parse()?)
}

/// The person a list mutation applies to.
///
/// An explicit `owner` parameter wins; the session's current person is the
/// fallback for forms that predate it.
pub fn resolve_owner(explicit: Option<String>, session: &Session) -> Result<Option<PersonId>, ApiError> {
    match present(explicit) {
        Some(raw) => parse_person_id(&raw).map(Some),
        None => Ok(session.current_person_id()),
    }
}
