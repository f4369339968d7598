//! Character entity - a playable participant of the scenario
//!
//! Witnesses share this shape: every character can testify about an event,
//! plus one fixed non-player witness (see [`Character::npc`]).

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;
use crate::value_objects::{CharacterName, Color, PlayerName};

/// Display name of the non-player witness.
pub const NPC_WITNESS_NAME: &str = "NPC";

/// A character in the scenario cast.
///
/// Simple data struct with public fields: names are validated by their newtypes,
/// cross-entity rules (count, unique ids) are checked by `TimelineConfig::validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: CharacterName,
    #[serde(default)]
    pub player_name: PlayerName,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub memo: String,
    /// Display position; lower sorts first.
    #[serde(default)]
    pub sort: u32,
}

impl Character {
    pub fn new(name: CharacterName) -> Self {
        Self {
            id: CharacterId::new(),
            name,
            player_name: PlayerName::empty(),
            color: Color::from_palette(0),
            memo: String::new(),
            sort: 0,
        }
    }

    /// The non-player witness appended to every witness list.
    pub fn npc() -> Self {
        Self {
            id: CharacterId::NPC,
            name: CharacterName::from_trusted(NPC_WITNESS_NAME),
            player_name: PlayerName::empty(),
            color: Color::event_default(),
            memo: String::new(),
            sort: u32::MAX,
        }
    }

    pub fn is_npc(&self) -> bool {
        self.id.is_npc()
    }

    // Builder-style methods

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn played_by(mut self, player_name: PlayerName) -> Self {
        self.player_name = player_name;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_sort(mut self, sort: u32) -> Self {
        self.sort = sort;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npc_has_fixed_identity() {
        let a = Character::npc();
        let b = Character::npc();
        assert_eq!(a, b);
        assert!(a.is_npc());
        assert_eq!(a.name.as_str(), NPC_WITNESS_NAME);
    }

    #[test]
    fn builder_sets_fields() {
        let c = Character::new(CharacterName::new("Butler").unwrap())
            .played_by(PlayerName::new("Aki").unwrap())
            .with_memo("knows the cellar")
            .with_sort(3);
        assert_eq!(c.player_name.as_str(), "Aki");
        assert_eq!(c.memo, "knows the cellar");
        assert_eq!(c.sort, 3);
        assert!(!c.is_npc());
    }

    #[test]
    fn deserialize_fills_optional_fields() {
        let json = format!(r#"{{"id":"{}","name":"Maid"}}"#, CharacterId::new());
        let c: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(c.name.as_str(), "Maid");
        assert_eq!(c.player_name, PlayerName::empty());
        assert_eq!(c.sort, 0);
    }
}
