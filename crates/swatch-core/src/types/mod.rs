//! Document types stored by Swatch.

pub mod ids;
pub mod item;
pub mod person;

pub use ids::{ItemId, PersonId};
pub use item::Item;
pub use person::Person;
