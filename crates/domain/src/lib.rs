pub mod common;

pub mod config;
pub mod entities;
pub mod error;
pub mod event;
pub mod ids;
pub mod map;
pub mod overlap;
pub mod resolver;
pub mod time_grid;
pub mod validation;
pub mod value_objects;

pub use config::{
    Schedule, TimeWindow, TimelineConfig, CHARACTER_MAX_COUNT, CHARACTER_MIN_COUNT,
    PLACE_MAX_COUNT, SCHEDULE_MAX_DAYS, SCHEDULE_MAX_MINUTES,
};

pub use entities::{
    next_sort, Character, Place, Scenario, Sorted, DEFAULT_SCENARIO_NAME, NPC_WITNESS_NAME,
};

pub use error::DomainError;

pub use event::{EventDraft, EventPatch, TimelineEvent};

// Re-export ID types
pub use ids::{CharacterId, EventId, PlaceId};

pub use map::{resolve_markers, unplaced_places, MapMarker, Position, ResolvedMarker};

pub use overlap::{ActorColumn, AlibiMap, AlibiSlot, RowSpanMap, SpanCell};

pub use resolver::{resolve, ReferenceMiss, ReferencePolicy, Resolution};

pub use time_grid::{generate, TimeGrid, TimeSlots};

pub use validation::{FieldError, ValidationErrors};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    CharacterName, ClockTime, Color, Interval, PlaceMemo, PlaceName, PlayerName, ScenarioName,
    TimePoint, COLOR_EVENT_DEFAULT, COLOR_SET, INTERVAL_PRESETS, MINUTES_PER_DAY,
};
