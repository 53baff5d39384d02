//! # swatch-api
//!
//! HTTP surface for Swatch.
//!
//! This crate provides:
//! - The route table and one handler per route ([`routes`])
//! - HTML rendering for the dashboard, item list, and copy picker ([`views`])
//! - Error-to-response mapping ([`error`])
//! - The [`Server`] that wires store, sessions, and tracing together

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod params;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

pub use error::{ApiError, Error, Result};
pub use server::Server;
pub use state::AppState;
