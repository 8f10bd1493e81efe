//! Opaque identifiers used at the boundary with the repository collaborator.
//!
//! Real seasonal data keys players and teams by a stable alphanumeric id
//! (e.g. a Retrosheet-style id such as `troutmi01`), not a generated UUID,
//! so these wrap `String` rather than reaching for `uuid`.

use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[derive(serde::Deserialize, serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> $name {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<$name, Self::Err> {
                Ok($name(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> $name {
                $name(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> $name {
                $name(s)
            }
        }
    };
}

string_id!(PlayerId);
string_id!(TeamId);

/// A calendar year, newtyped so it can't be confused with other integers
/// (era lookups, park-factor lookups, and stat-line lookups are all keyed by
/// `Season`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Season(pub u16);

impl Season {
    pub fn year(self) -> u16 {
        self.0
    }
}

impl From<u16> for Season {
    fn from(year: u16) -> Season {
        Season(year)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
