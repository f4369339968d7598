//! The authoring session: one explicit state object owning every store.
//!
//! All mutations go through `&mut Session`, so there is a single writer and
//! each call is one atomic state transition. Derived views (time grid, row
//! spans, alibi map, resolved markers) are recomputed from the committed state
//! on every call and never cached.

use alibi_domain::{
    generate, resolve_markers, unplaced_places, AlibiMap, CharacterId, ClockTime, EventDraft,
    EventId, EventPatch, Place, PlaceId, ReferenceMiss, ReferencePolicy, ResolvedMarker, RowSpanMap,
    Scenario, TimeGrid, TimelineConfig, TimelineEvent,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::stores::{ConfigStore, EventStore, MapMarkerStore, Saved};

/// The complete session state, as carried by a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub scenario: Scenario,
    pub config: TimelineConfig,
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
    #[serde(default)]
    pub map: MapMarkerStore,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    config: ConfigStore,
    events: EventStore,
    map: MapMarkerStore,
}

impl Session {
    pub fn new(policy: ReferencePolicy) -> Self {
        Self {
            config: ConfigStore::default(),
            events: EventStore::new(policy),
            map: MapMarkerStore::default(),
        }
    }

    /// Builds a session from snapshot data, keeping `policy`. Only the schedule
    /// and event ids are checked; the rest of the configuration is taken as is.
    pub fn from_data(data: SessionData, policy: ReferencePolicy) -> Result<Self, EngineError> {
        data.config.schedule.validate()?;
        Ok(Self {
            events: EventStore::from_events(data.events, policy)?,
            config: ConfigStore::from_parts(data.scenario, data.config),
            map: data.map,
        })
    }

    pub fn data(&self) -> SessionData {
        SessionData {
            scenario: self.config.scenario().clone(),
            config: self.config.config().clone(),
            events: self.events.events().to_vec(),
            map: self.map.clone(),
        }
    }

    /// Swaps in `data` as a whole. On error nothing changes.
    pub fn replace(&mut self, data: SessionData) -> Result<(), EngineError> {
        let next = Self::from_data(data, self.events.policy())?;
        *self = next;
        tracing::info!(
            characters = self.config().characters.len(),
            places = self.config().places.len(),
            events = self.events.len(),
            "Replaced session state"
        );
        Ok(())
    }

    // =========================================================================
    // Stores
    // =========================================================================

    pub fn scenario(&self) -> &Scenario {
        self.config.scenario()
    }

    pub fn config(&self) -> &TimelineConfig {
        self.config.config()
    }

    /// Cast, places, schedule and scenario edits.
    ///
    /// Edits here do not touch stored events; call
    /// [`Session::refresh_event_references`] to re-resolve them.
    pub fn config_store(&mut self) -> &mut ConfigStore {
        &mut self.config
    }

    pub fn events(&self) -> &[TimelineEvent] {
        self.events.events()
    }

    pub fn event(&self, id: EventId) -> Option<&TimelineEvent> {
        self.events.get(id)
    }

    pub fn events_for(&self, character_id: CharacterId) -> Vec<&TimelineEvent> {
        self.events.for_character(character_id)
    }

    pub fn reference_policy(&self) -> ReferencePolicy {
        self.events.policy()
    }

    pub fn set_reference_policy(&mut self, policy: ReferencePolicy) {
        self.events.set_policy(policy);
    }

    pub fn create_event(&mut self, draft: EventDraft) -> Result<Saved, EngineError> {
        self.events.create(draft, self.config.config())
    }

    pub fn update_event(&mut self, id: EventId, patch: &EventPatch) -> Result<Saved, EngineError> {
        self.events.update(id, patch, self.config.config())
    }

    pub fn delete_event(&mut self, id: EventId) -> Option<TimelineEvent> {
        self.events.delete(id)
    }

    /// Re-materializes every event against the current config.
    pub fn refresh_event_references(&mut self) -> Vec<(EventId, Vec<ReferenceMiss>)> {
        self.events.refresh(self.config.config())
    }

    pub fn map(&self) -> &MapMarkerStore {
        &self.map
    }

    pub fn map_store(&mut self) -> &mut MapMarkerStore {
        &mut self.map
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    pub fn time_grid(&self) -> TimeGrid {
        generate(&self.config().schedule)
    }

    pub fn day_presets(&self, day: u32) -> Vec<ClockTime> {
        self.time_grid().day_presets(day)
    }

    /// One column per character, in display order.
    pub fn row_spans(&self) -> RowSpanMap {
        RowSpanMap::build(&self.config().characters, self.events(), &self.time_grid())
    }

    pub fn alibi_map(&self) -> AlibiMap<'_> {
        AlibiMap::build(self.events(), &self.time_grid())
    }

    pub fn resolved_markers(&self) -> Vec<ResolvedMarker<'_>> {
        resolve_markers(self.map.markers(), &self.config().places)
    }

    pub fn unplaced_places(&self) -> Vec<&Place> {
        unplaced_places(self.map.markers(), &self.config().places)
    }

    /// Events at `place_id` during the slot of the map's selected time.
    pub fn events_at_selected_time(&self, place_id: PlaceId) -> Vec<&TimelineEvent> {
        match self.map.selected_time() {
            Some(time) => self.alibi_map().at_place(time, place_id),
            None => Vec::new(),
        }
    }
}
