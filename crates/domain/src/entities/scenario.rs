//! Scenario entity - session metadata

use serde::{Deserialize, Serialize};

use crate::value_objects::ScenarioName;

pub const DEFAULT_SCENARIO_NAME: &str = "Untitled scenario";

/// The mystery being authored: a name and a free-text synopsis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: ScenarioName,
    #[serde(default)]
    pub synopsis: String,
}

impl Scenario {
    pub fn new(name: ScenarioName) -> Self {
        Self {
            name,
            synopsis: String::new(),
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new(ScenarioName::from_trusted(DEFAULT_SCENARIO_NAME))
    }
}
