//! Timeline events - the draft that crosses the UI boundary and the
//! materialized record the stores keep.
//!
//! A draft carries only primitive fields and ids. Resolving it against the
//! current [`TimelineConfig`](crate::config::TimelineConfig) (see
//! [`crate::resolver`]) produces a [`TimelineEvent`] holding copies of the
//! referenced entities, so later config edits do not leak into stored events
//! until they are explicitly re-resolved.

use serde::{Deserialize, Serialize};

use crate::entities::{Character, Place};
use crate::ids::{CharacterId, EventId, PlaceId};
use crate::validation::ValidationErrors;
use crate::value_objects::{Color, TimePoint};

// ============================================================================
// EventDraft
// ============================================================================

/// An event as entered by the user: ids only, no entity snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// `None` asks the store to generate a fresh id.
    #[serde(default)]
    pub id: Option<EventId>,
    pub start: TimePoint,
    #[serde(default)]
    pub end: Option<TimePoint>,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub place_id: Option<PlaceId>,
    #[serde(default)]
    pub character_ids: Vec<CharacterId>,
    #[serde(default)]
    pub witness_id: Option<CharacterId>,
}

impl EventDraft {
    pub fn new(start: TimePoint) -> Self {
        Self {
            id: None,
            start,
            end: None,
            color: Color::event_default(),
            detail: String::new(),
            place_id: None,
            character_ids: Vec::new(),
            witness_id: None,
        }
    }

    pub fn with_id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn ending_at(mut self, end: TimePoint) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn at_place(mut self, place_id: PlaceId) -> Self {
        self.place_id = Some(place_id);
        self
    }

    pub fn involving(mut self, character_id: CharacterId) -> Self {
        self.character_ids.push(character_id);
        self
    }

    pub fn witnessed_by(mut self, witness_id: CharacterId) -> Self {
        self.witness_id = Some(witness_id);
        self
    }

    /// Field checks run before a save. Reference checks happen in the resolver.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(end) = self.end {
            if end < self.start {
                errors.push("end", "End time must not be before start time");
            }
        }
        errors.into_result()
    }
}

// ============================================================================
// TimelineEvent
// ============================================================================

/// A materialized event: every reference replaced by a snapshot of the entity.
///
/// A reference that could not be resolved is simply absent here; the
/// resolver reports it separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: EventId,
    pub start: TimePoint,
    #[serde(default)]
    pub end: Option<TimePoint>,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub place: Option<Place>,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub witness: Option<Character>,
}

impl TimelineEvent {
    pub fn place_id(&self) -> Option<PlaceId> {
        self.place.as_ref().map(|p| p.id)
    }

    pub fn character_ids(&self) -> Vec<CharacterId> {
        self.characters.iter().map(|c| c.id).collect()
    }

    pub fn witness_id(&self) -> Option<CharacterId> {
        self.witness.as_ref().map(|w| w.id)
    }

    /// Back to the id-only form, e.g. to re-resolve against a newer config.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            id: Some(self.id),
            start: self.start,
            end: self.end,
            color: self.color.clone(),
            detail: self.detail.clone(),
            place_id: self.place_id(),
            character_ids: self.character_ids(),
            witness_id: self.witness_id(),
        }
    }

    /// Whether `character_id` takes part in the event (witnessing is not taking part).
    pub fn involves(&self, character_id: CharacterId) -> bool {
        self.characters.iter().any(|c| c.id == character_id)
    }

    pub fn is_at(&self, place_id: PlaceId) -> bool {
        self.place_id() == Some(place_id)
    }

    /// Half-open overlap of `[start, end)` with `[from, to)`.
    ///
    /// An event without an end never overlaps anything.
    pub fn overlaps(&self, from: TimePoint, to: TimePoint) -> bool {
        match self.end {
            Some(end) => self.start < to && end > from,
            None => false,
        }
    }
}

// ============================================================================
// EventPatch
// ============================================================================

/// The patchable fields of a stored event. `None` leaves a field untouched;
/// the nested `Option`s clear a value with `Some(None)`.
///
/// The id is never patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub start: Option<TimePoint>,
    pub end: Option<Option<TimePoint>>,
    pub color: Option<Color>,
    pub detail: Option<String>,
    pub place_id: Option<Option<PlaceId>>,
    pub character_ids: Option<Vec<CharacterId>>,
    pub witness_id: Option<Option<CharacterId>>,
}

impl EventPatch {
    /// The patch a drag or resize on the grid produces.
    pub fn moved(start: TimePoint, end: Option<TimePoint>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge onto `draft`: present fields replace, absent ones are kept.
    pub fn apply_to(&self, draft: &mut EventDraft) {
        if let Some(start) = self.start {
            draft.start = start;
        }
        if let Some(end) = self.end {
            draft.end = end;
        }
        if let Some(color) = &self.color {
            draft.color = color.clone();
        }
        if let Some(detail) = &self.detail {
            draft.detail = detail.clone();
        }
        if let Some(place_id) = self.place_id {
            draft.place_id = place_id;
        }
        if let Some(character_ids) = &self.character_ids {
            draft.character_ids = character_ids.clone();
        }
        if let Some(witness_id) = self.witness_id {
            draft.witness_id = witness_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::CharacterName;

    fn at(hm: &str) -> TimePoint {
        TimePoint::at(0, hm.parse().unwrap())
    }

    fn event(start: &str, end: Option<&str>) -> TimelineEvent {
        TimelineEvent {
            id: EventId::new(),
            start: at(start),
            end: end.map(at),
            color: Color::event_default(),
            detail: String::new(),
            place: None,
            characters: Vec::new(),
            witness: None,
        }
    }

    #[test]
    fn draft_rejects_end_before_start() {
        let draft = EventDraft::new(at("11:00")).ending_at(at("10:00"));
        let errors = draft.validate().unwrap_err();
        assert!(errors.for_field("end").is_some());

        let instant = EventDraft::new(at("11:00")).ending_at(at("11:00"));
        assert!(instant.validate().is_ok());
        assert!(EventDraft::new(at("11:00")).validate().is_ok());
    }

    #[test]
    fn overlap_is_half_open() {
        let e = event("10:00", Some("11:00"));
        assert!(!e.overlaps(at("11:00"), at("12:00")));
        assert!(!e.overlaps(at("09:00"), at("10:00")));
        assert!(e.overlaps(at("10:30"), at("11:30")));
        assert!(e.overlaps(at("09:00"), at("12:00")));
    }

    #[test]
    fn open_ended_event_never_overlaps() {
        let e = event("10:00", None);
        assert!(!e.overlaps(at("09:00"), at("12:00")));
    }

    #[test]
    fn to_draft_keeps_resolved_references() {
        let alice = Character::new(CharacterName::new("Alice").unwrap());
        let mut e = event("10:00", Some("10:30"));
        e.characters.push(alice.clone());
        e.witness = Some(Character::npc());

        let draft = e.to_draft();
        assert_eq!(draft.id, Some(e.id));
        assert_eq!(draft.character_ids, vec![alice.id]);
        assert_eq!(draft.witness_id, Some(CharacterId::NPC));
        assert!(e.involves(alice.id));
        assert!(!e.involves(CharacterId::NPC));
    }

    #[test]
    fn patch_merges_present_fields_only() {
        let place = PlaceId::new();
        let mut draft = EventDraft::new(at("10:00"))
            .ending_at(at("11:00"))
            .with_detail("Argument in the hall")
            .at_place(place);

        EventPatch {
            detail: Some("Quarrel".into()),
            end: Some(None),
            ..EventPatch::default()
        }
        .apply_to(&mut draft);

        assert_eq!(draft.detail, "Quarrel");
        assert_eq!(draft.end, None);
        assert_eq!(draft.start, at("10:00"));
        assert_eq!(draft.place_id, Some(place));
    }

    #[test]
    fn moved_patch_only_touches_times() {
        let patch = EventPatch::moved(at("12:00"), Some(at("13:00")));
        let mut draft = EventDraft::new(at("10:00")).with_detail("Dinner");
        patch.apply_to(&mut draft);
        assert_eq!(draft.start, at("12:00"));
        assert_eq!(draft.end, Some(at("13:00")));
        assert_eq!(draft.detail, "Dinner");
        assert!(!patch.is_empty());
        assert!(EventPatch::default().is_empty());
    }

    #[test]
    fn draft_deserializes_with_defaults() {
        let draft: EventDraft = serde_json::from_str(r#"{"start":"1970-01-01T10:00:00"}"#).unwrap();
        assert_eq!(draft.id, None);
        assert_eq!(draft.start, at("10:00"));
        assert!(draft.character_ids.is_empty());
        assert_eq!(draft.color, Color::event_default());
    }
}
