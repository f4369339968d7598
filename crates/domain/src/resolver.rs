//! Reference resolution: event draft + config snapshot -> materialized event.
//!
//! Pure. Never touches the draft or the config. Unknown ids do not fail the
//! resolution; they are left out of the event and listed in
//! [`Resolution::misses`] so the caller decides what to do with them
//! (see [`ReferencePolicy`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::TimelineConfig;
use crate::error::DomainError;
use crate::event::{EventDraft, TimelineEvent};
use crate::ids::{CharacterId, EventId, PlaceId};

/// An id on a draft that matched nothing in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum ReferenceMiss {
    Character(CharacterId),
    Place(PlaceId),
    Witness(CharacterId),
}

impl fmt::Display for ReferenceMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character(id) => write!(f, "character {}", id),
            Self::Place(id) => write!(f, "place {}", id),
            Self::Witness(id) => write!(f, "witness {}", id),
        }
    }
}

/// The materialized event plus every reference that failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub event: TimelineEvent,
    pub misses: Vec<ReferenceMiss>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.misses.is_empty()
    }
}

/// Resolves every id on `draft` against `config`.
///
/// A draft without an id gets a freshly generated one. Character ids are kept
/// in draft order; unknown ones are dropped. An unknown place or witness
/// leaves that slot empty.
pub fn resolve(draft: &EventDraft, config: &TimelineConfig) -> Resolution {
    let mut misses = Vec::new();

    let characters = draft
        .character_ids
        .iter()
        .filter_map(|&id| {
            let found = config.character(id).cloned();
            if found.is_none() {
                misses.push(ReferenceMiss::Character(id));
            }
            found
        })
        .collect();

    let place = draft.place_id.and_then(|id| {
        let found = config.place(id).cloned();
        if found.is_none() {
            misses.push(ReferenceMiss::Place(id));
        }
        found
    });

    let witness = draft.witness_id.and_then(|id| {
        let found = config.witness(id);
        if found.is_none() {
            misses.push(ReferenceMiss::Witness(id));
        }
        found
    });

    Resolution {
        event: TimelineEvent {
            id: draft.id.unwrap_or_else(EventId::new),
            start: draft.start,
            end: draft.end,
            color: draft.color.clone(),
            detail: draft.detail.clone(),
            place,
            characters,
            witness,
        },
        misses,
    }
}

/// What a store does with a resolution that has misses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferencePolicy {
    /// Keep the event without the unknown references and report them.
    #[default]
    Tolerate,
    /// Refuse the save.
    Reject,
}

impl fmt::Display for ReferencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tolerate => write!(f, "tolerate"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for ReferencePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tolerate" => Ok(Self::Tolerate),
            "reject" => Ok(Self::Reject),
            other => Err(DomainError::parse(format!(
                "Unknown reference policy {:?} (expected tolerate or reject)",
                other
            ))),
        }
    }
}
