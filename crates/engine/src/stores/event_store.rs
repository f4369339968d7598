//! Ordered collection of materialized timeline events.
//!
//! Each event is either present or absent; there is no soft delete. Ids are
//! unique across the store. Drafts pass through the reference resolver on
//! create and again after every update merge.

use alibi_domain::{
    resolve, CharacterId, EventDraft, EventId, EventPatch, ReferenceMiss, ReferencePolicy,
    Resolution, TimelineConfig, TimelineEvent,
};

use crate::error::EngineError;

/// Result of a successful save: the event id and any references left out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub id: EventId,
    pub dropped: Vec<ReferenceMiss>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: Vec<TimelineEvent>,
    policy: ReferencePolicy,
}

impl EventStore {
    pub fn new(policy: ReferencePolicy) -> Self {
        Self {
            events: Vec::new(),
            policy,
        }
    }

    /// Restores a stored list, refusing it if two events share an id.
    pub fn from_events(
        events: Vec<TimelineEvent>,
        policy: ReferencePolicy,
    ) -> Result<Self, EngineError> {
        for (i, event) in events.iter().enumerate() {
            if events[..i].iter().any(|e| e.id == event.id) {
                return Err(EngineError::duplicate("Event", event.id));
            }
        }
        Ok(Self { events, policy })
    }

    pub fn policy(&self) -> ReferencePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ReferencePolicy) {
        self.policy = policy;
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TimelineEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: EventId) -> Option<&TimelineEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// The per-character event column, in store order.
    pub fn for_character(&self, character_id: CharacterId) -> Vec<&TimelineEvent> {
        self.events
            .iter()
            .filter(|e| e.involves(character_id))
            .collect()
    }

    /// Appends a new event. A draft without an id gets a fresh one.
    pub fn create(
        &mut self,
        draft: EventDraft,
        config: &TimelineConfig,
    ) -> Result<Saved, EngineError> {
        draft.validate()?;
        if let Some(id) = draft.id {
            if self.get(id).is_some() {
                tracing::warn!(event_id = %id, "Refused to create an event with an existing id");
                return Err(EngineError::duplicate("Event", id));
            }
        }

        let Resolution { event, misses } = self.admit(resolve(&draft, config))?;
        let id = event.id;
        self.events.push(event);
        tracing::debug!(event_id = %id, dropped = misses.len(), "Created event");
        Ok(Saved {
            id,
            dropped: misses,
        })
    }

    /// Merges `patch` onto the stored event and re-resolves its references.
    pub fn update(
        &mut self,
        id: EventId,
        patch: &EventPatch,
        config: &TimelineConfig,
    ) -> Result<Saved, EngineError> {
        let Some(index) = self.events.iter().position(|e| e.id == id) else {
            tracing::warn!(event_id = %id, "Update for unknown event");
            return Err(EngineError::not_found("Event", id));
        };

        let mut draft = self.events[index].to_draft();
        patch.apply_to(&mut draft);
        draft.validate()?;

        let Resolution { event, misses } = self.admit(resolve(&draft, config))?;
        self.events[index] = event;
        tracing::debug!(event_id = %id, dropped = misses.len(), "Updated event");
        Ok(Saved {
            id,
            dropped: misses,
        })
    }

    /// Removes the event with `id`, if any. Deleting an unknown id is a no-op.
    pub fn delete(&mut self, id: EventId) -> Option<TimelineEvent> {
        let index = self.events.iter().position(|e| e.id == id)?;
        let removed = self.events.remove(index);
        tracing::debug!(event_id = %id, "Deleted event");
        Some(removed)
    }

    /// Re-materializes every event against `config`.
    ///
    /// Always tolerant: the config edit that caused the misses is already
    /// committed. Returns the misses per affected event.
    pub fn refresh(&mut self, config: &TimelineConfig) -> Vec<(EventId, Vec<ReferenceMiss>)> {
        let mut report = Vec::new();
        for event in &mut self.events {
            let Resolution {
                event: refreshed,
                misses,
            } = resolve(&event.to_draft(), config);
            if !misses.is_empty() {
                tracing::warn!(event_id = %event.id, dropped = misses.len(), "Event lost references");
                report.push((event.id, misses));
            }
            *event = refreshed;
        }
        report
    }

    fn admit(&self, resolution: Resolution) -> Result<Resolution, EngineError> {
        if resolution.is_complete() {
            return Ok(resolution);
        }
        for miss in &resolution.misses {
            tracing::warn!(event_id = %resolution.event.id, %miss, "Unresolved event reference");
        }
        match self.policy {
            ReferencePolicy::Tolerate => Ok(resolution),
            ReferencePolicy::Reject => Err(EngineError::DanglingReference(resolution.misses)),
        }
    }
}
