//! Store-generated identifiers for persons and items.
//!
//! Both identifiers wrap a UUID v7. The leading timestamp makes the byte
//! order of freshly generated ids follow creation order, which is the
//! "default order" every store backend lists documents in.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::Error;

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh, time-ordered identifier.
            ///
            /// Only store backends should call this.
            pub fn generate() -> Self {
                Self(Uuid::now_v7())
            }

            /// Returns the integer form used as a storage key.
            ///
            /// Key order matches the order of the ids themselves.
            pub fn to_key(&self) -> u128 {
                self.0.as_u128()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| Error::invalid_id($kind, s, e))
            }
        }
    };
}

document_id!(
    /// Identifier of a [`Person`](crate::Person) document.
    PersonId,
    "person"
);

document_id!(
    /// Identifier of an [`Item`](crate::Item) document.
    ItemId,
    "item"
);
