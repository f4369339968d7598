//! Display colors for characters, places and events.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Preset palette offered when picking a color.
pub const COLOR_SET: [&str; 14] = [
    "#2e2e2e", "#868e96", "#fa5252", "#e64980", "#be4bdb", "#7950f2", "#4c6ef5", "#228be6",
    "#15aabf", "#12b886", "#40c057", "#82c91e", "#fab005", "#fd7e14",
];

/// Color given to events that do not pick one.
pub const COLOR_EVENT_DEFAULT: &str = "#868e96";

const MAX_COLOR_LENGTH: usize = 32;

/// A CSS color: `#rgb`, `#rrggbb`, or a named color such as `red`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for anything that is neither a
    /// 3/6-digit hex color nor an ASCII color name.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        let valid = match trimmed.strip_prefix('#') {
            Some(hex) => {
                (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
            }
            None => {
                !trimmed.is_empty()
                    && trimmed.len() <= MAX_COLOR_LENGTH
                    && trimmed.chars().all(|c| c.is_ascii_alphabetic())
            }
        };
        if !valid {
            return Err(DomainError::validation(format!("Invalid color: {:?}", trimmed)));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// The default event color.
    pub fn event_default() -> Self {
        Self(COLOR_EVENT_DEFAULT.to_string())
    }

    /// Palette entry for the n-th item, wrapping around.
    pub fn from_palette(index: usize) -> Self {
        Self(COLOR_SET[index % COLOR_SET.len()].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::event_default()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.0
    }
}
