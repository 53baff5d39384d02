//! Session context document.

use serde::{Deserialize, Serialize};
use swatch_core::PersonId;

/// State carried between requests of one browser session.
///
/// `current_person_id` is advisory: the person it names may have been
/// deleted from another session, so readers must tolerate a missing owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    /// Person whose list was viewed most recently
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_person_id: Option<PersonId>,
    /// Name for the list a pending copy will create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_new_list_name: Option<String>,
}

impl SessionContext {
    /// Whether there is nothing worth persisting.
    pub fn is_empty(&self) -> bool {
        self.current_person_id.is_none() && self.pending_new_list_name.is_none()
    }
}
