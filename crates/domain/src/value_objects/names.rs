//! Validated name newtypes for scenario entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty (except `PlayerName` and `PlaceMemo`)
//! - Within length limits, counted in characters rather than bytes
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for character names
pub const CHARACTER_NAME_MAX_LENGTH: usize = 20;

/// Maximum length for player names
pub const PLAYER_NAME_MAX_LENGTH: usize = 20;

/// Maximum length for place names
pub const PLACE_NAME_MAX_LENGTH: usize = 30;

/// Maximum length for place memos
pub const PLACE_MEMO_MAX_LENGTH: usize = 100;

/// Maximum length for scenario names
pub const SCENARIO_NAME_MAX_LENGTH: usize = 100;

fn bounded(
    value: String,
    label: &str,
    max: usize,
    allow_empty: bool,
) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if !allow_empty && trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", label)));
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            label, max
        )));
    }
    Ok(trimmed.to_string())
}

macro_rules! define_name {
    ($(#[$meta:meta])* $name:ident, $label:literal, $max:expr, allow_empty = $allow_empty:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new validated value.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::Validation` if the trimmed value is empty
            /// (where not allowed) or longer than the limit.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                bounded(value.into(), $label, $max, $allow_empty).map(Self)
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }
    };
}

define_name!(
    /// A validated character name (non-empty, <=20 chars, trimmed)
    CharacterName,
    "Character name",
    CHARACTER_NAME_MAX_LENGTH,
    allow_empty = false
);

define_name!(
    /// The name of the person playing a character (may be empty, <=20 chars)
    PlayerName,
    "Player name",
    PLAYER_NAME_MAX_LENGTH,
    allow_empty = true
);

define_name!(
    /// A validated place name (non-empty, <=30 chars, trimmed)
    PlaceName,
    "Place name",
    PLACE_NAME_MAX_LENGTH,
    allow_empty = false
);

define_name!(
    /// A short note attached to a place (may be empty, <=100 chars)
    PlaceMemo,
    "Place memo",
    PLACE_MEMO_MAX_LENGTH,
    allow_empty = true
);

define_name!(
    /// A validated scenario name (non-empty, <=100 chars, trimmed)
    ScenarioName,
    "Scenario name",
    SCENARIO_NAME_MAX_LENGTH,
    allow_empty = false
);

impl CharacterName {
    /// For compile-time literals already known to satisfy the limits.
    pub(crate) fn from_trusted(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl ScenarioName {
    pub(crate) fn from_trusted(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl PlayerName {
    pub fn empty() -> Self {
        Self(String::new())
    }
}

impl Default for PlayerName {
    fn default() -> Self {
        Self::empty()
    }
}

impl PlaceMemo {
    pub fn empty() -> Self {
        Self(String::new())
    }
}

impl Default for PlaceMemo {
    fn default() -> Self {
        Self::empty()
    }
}
