//! Route table.
//!
//! Paths and parameter names are fixed; browsers and bookmarks depend on them.

pub mod colours;
pub mod copy;
pub mod health;
pub mod persons;

use axum::Router;
use axum::response::Redirect;
use axum::routing::{get, post};
use swatch_core::PersonId;

use crate::state::AppState;
use crate::views::persons_colours_path;

/// Build the router for all Swatch routes.
///
/// Session handling is not installed here; see [`Server::router`](crate::Server::router).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(persons::index))
        .route("/addPerson", post(persons::add_person))
        .route("/deletePerson", get(persons::delete_person))
        .route("/personsColours", get(colours::persons_colours))
        .route("/addColour", post(colours::add_colour))
        .route("/deleteColour", get(colours::delete_colour))
        .route("/editColour", post(colours::edit_colour))
        .route("/pickCopyList", get(copy::pick_copy_list))
        .route("/copyList", post(copy::copy_list))
        .route("/health", get(health::health))
        .with_state(state)
}

/// Redirect to the dashboard.
pub(crate) fn to_dashboard() -> Redirect {
    Redirect::to("/")
}

/// Redirect to `owner`'s list, or the dashboard when no owner is known.
pub(crate) fn to_list(owner: Option<PersonId>) -> Redirect {
    match owner {
        Some(id) => Redirect::to(&persons_colours_path(id)),
        None => to_dashboard(),
    }
}
