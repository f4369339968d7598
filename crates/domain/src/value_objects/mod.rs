//! Value objects - immutable, validated-by-construction building blocks.

pub mod clock;
pub mod color;
pub mod names;

pub use clock::{ClockTime, Interval, TimePoint, INTERVAL_PRESETS, MINUTES_PER_DAY};
pub use color::{Color, COLOR_EVENT_DEFAULT, COLOR_SET};
pub use names::{
    CharacterName, PlaceMemo, PlaceName, PlayerName, ScenarioName, CHARACTER_NAME_MAX_LENGTH,
    PLACE_MEMO_MAX_LENGTH, PLACE_NAME_MAX_LENGTH, PLAYER_NAME_MAX_LENGTH,
    SCENARIO_NAME_MAX_LENGTH,
};
