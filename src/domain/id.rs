//! Domain identifier types with proper encapsulation.
//!
//! All identifiers mirror the integer primary keys of the backing relational
//! store. Wrapping them keeps an owner id from being passed where a product
//! id is expected.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[doc = concat!("Create a new `", stringify!($name), "` from a raw key.")]
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Return the raw integer key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self::new(id)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

integer_id!(
    /// Store owner identifier. Recommendations are scoped per owner.
    OwnerId
);

integer_id!(
    /// Store identifier. An owner may operate several stores.
    StoreId
);

integer_id!(
    /// Catalog product identifier.
    ProductId
);

integer_id!(
    /// Customer identifier attached to a transaction.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_by_raw_key() {
        let mut ids = vec![ProductId::new(3), ProductId::new(1), ProductId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![ProductId::new(1), ProductId::new(2), ProductId::new(3)]);
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&OwnerId::new(42)).unwrap();
        assert_eq!(json, "42");

        let back: OwnerId = serde_json::from_str("42").unwrap();
        assert_eq!(back, OwnerId::new(42));
    }

    #[test]
    fn parses_from_text() {
        assert_eq!(" 12 ".parse::<OwnerId>().unwrap(), OwnerId::new(12));
        assert!("twelve".parse::<OwnerId>().is_err());
    }

    #[test]
    fn display_shows_raw_key() {
        assert_eq!(StoreId::new(7).to_string(), "7");
    }
}
