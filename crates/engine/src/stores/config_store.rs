//! Canonical scenario definitions: metadata, cast, places and schedule.
//!
//! Every edit works on a copy of the configuration, validates the whole
//! result and only then swaps it in, so readers never see a half-applied edit.
//! Removing a character or place does not touch events; their references
//! stop resolving on the next re-resolution.

use alibi_domain::{
    next_sort, Character, CharacterId, Place, PlaceId, Scenario, ScenarioName, Schedule,
    TimelineConfig,
};

use crate::error::EngineError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    scenario: Scenario,
    config: TimelineConfig,
}

impl ConfigStore {
    /// A store holding `config` as is. Used for imports, where only the
    /// schedule has been checked.
    pub fn from_parts(scenario: Scenario, mut config: TimelineConfig) -> Self {
        config.sort_entries();
        Self { scenario, config }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn rename_scenario(&mut self, name: &str) -> Result<(), EngineError> {
        self.scenario.name = ScenarioName::new(name)?;
        tracing::debug!(name = %self.scenario.name, "Renamed scenario");
        Ok(())
    }

    pub fn set_synopsis(&mut self, synopsis: impl Into<String>) {
        self.scenario.synopsis = synopsis.into();
        tracing::debug!("Updated scenario synopsis");
    }

    /// Replaces the whole configuration, as the configuration form does on save.
    pub fn commit(&mut self, config: TimelineConfig) -> Result<(), EngineError> {
        self.edit(|next| {
            *next = config;
            Ok(())
        })?;
        tracing::debug!(
            characters = self.config.characters.len(),
            places = self.config.places.len(),
            "Committed timeline configuration"
        );
        Ok(())
    }

    pub fn set_schedule(&mut self, schedule: Schedule) -> Result<(), EngineError> {
        self.edit(|next| {
            next.schedule = schedule;
            Ok(())
        })?;
        tracing::debug!(interval = %schedule.interval, start = %schedule.start, "Updated schedule");
        Ok(())
    }

    // =========================================================================
    // Characters
    // =========================================================================

    /// Appends a character. A zero sort key is replaced by the next free one.
    pub fn add_character(&mut self, mut character: Character) -> Result<CharacterId, EngineError> {
        let id = character.id;
        self.edit(|next| {
            if next.character(id).is_some() {
                return Err(EngineError::duplicate("Character", id));
            }
            if character.sort == 0 {
                character.sort = next_sort(&next.characters);
            }
            next.characters.push(character);
            Ok(())
        })?;
        tracing::debug!(character_id = %id, "Added character");
        Ok(id)
    }

    pub fn update_character(&mut self, character: Character) -> Result<(), EngineError> {
        let id = character.id;
        self.edit(|next| {
            let slot = next
                .characters
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| EngineError::not_found("Character", id))?;
            *slot = character;
            Ok(())
        })?;
        tracing::debug!(character_id = %id, "Updated character");
        Ok(())
    }

    pub fn update_character_memo(
        &mut self,
        id: CharacterId,
        memo: impl Into<String>,
    ) -> Result<(), EngineError> {
        let memo = memo.into();
        self.edit(|next| {
            let character = next
                .characters
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| EngineError::not_found("Character", id))?;
            character.memo = memo;
            Ok(())
        })?;
        tracing::debug!(character_id = %id, "Updated character memo");
        Ok(())
    }

    pub fn remove_character(&mut self, id: CharacterId) -> Result<Character, EngineError> {
        let removed = self.edit(|next| {
            let index = next
                .characters
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| EngineError::not_found("Character", id))?;
            Ok(next.characters.remove(index))
        })?;
        tracing::debug!(character_id = %id, "Removed character");
        Ok(removed)
    }

    // =========================================================================
    // Places
    // =========================================================================

    pub fn add_place(&mut self, mut place: Place) -> Result<PlaceId, EngineError> {
        let id = place.id;
        self.edit(|next| {
            if next.place(id).is_some() {
                return Err(EngineError::duplicate("Place", id));
            }
            if place.sort == 0 {
                place.sort = next_sort(&next.places);
            }
            next.places.push(place);
            Ok(())
        })?;
        tracing::debug!(place_id = %id, "Added place");
        Ok(id)
    }

    pub fn update_place(&mut self, place: Place) -> Result<(), EngineError> {
        let id = place.id;
        self.edit(|next| {
            let slot = next
                .places
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| EngineError::not_found("Place", id))?;
            *slot = place;
            Ok(())
        })?;
        tracing::debug!(place_id = %id, "Updated place");
        Ok(())
    }

    pub fn remove_place(&mut self, id: PlaceId) -> Result<Place, EngineError> {
        let removed = self.edit(|next| {
            let index = next
                .places
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| EngineError::not_found("Place", id))?;
            Ok(next.places.remove(index))
        })?;
        tracing::debug!(place_id = %id, "Removed place");
        Ok(removed)
    }

    /// Applies `change` to a copy, then validates and commits it in one step.
    fn edit<T>(
        &mut self,
        change: impl FnOnce(&mut TimelineConfig) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let mut next = self.config.clone();
        let output = change(&mut next)?;
        next.sort_entries();
        if let Err(errors) = next.validate() {
            tracing::debug!(%errors, "Rejected configuration edit");
            return Err(errors.into());
        }
        self.config = next;
        Ok(output)
    }
}
