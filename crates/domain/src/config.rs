//! Timeline configuration - the canonical cast, places and schedule
//!
//! Every derived view (time grid, resolved events, occupancy maps) is a pure
//! function of this struct plus the event list. Edits replace the whole
//! configuration after `validate` succeeds; nothing is patched in place.

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::entities::{Character, Place};
use crate::ids::{CharacterId, PlaceId};
use crate::validation::ValidationErrors;
use crate::value_objects::{ClockTime, Interval, MINUTES_PER_DAY};

/// Maximum number of characters in a scenario
pub const CHARACTER_MAX_COUNT: usize = 10;
/// Minimum number of characters in a scenario
pub const CHARACTER_MIN_COUNT: usize = 1;
/// Maximum number of places in a scenario
pub const PLACE_MAX_COUNT: usize = 10;
/// Maximum number of calendar days a schedule may span
pub const SCHEDULE_MAX_DAYS: u32 = 31;
/// Longest `Lasting` window, in minutes
pub const SCHEDULE_MAX_MINUTES: u32 = SCHEDULE_MAX_DAYS * MINUTES_PER_DAY;

// ============================================================================
// Schedule
// ============================================================================

/// How the end of the scheduled window is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeWindow {
    /// Ends at this time of day on the last scenario day.
    Until(ClockTime),
    /// Ends this many minutes after the start; the day count follows from it.
    Lasting(u32),
}

/// Scheduling parameters of the time grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub interval: Interval,
    pub start: ClockTime,
    pub window: TimeWindow,
    /// Number of calendar days spanned when the window is `Until`.
    #[serde(default = "one_day")]
    pub days: NonZeroU32,
}

fn one_day() -> NonZeroU32 {
    NonZeroU32::MIN
}

impl Schedule {
    /// A single-day schedule from `start` until `end`.
    pub fn single_day(interval: Interval, start: ClockTime, end: ClockTime) -> Self {
        Self {
            interval,
            start,
            window: TimeWindow::Until(end),
            days: one_day(),
        }
    }

    pub fn lasting(interval: Interval, start: ClockTime, minutes: u32) -> Self {
        Self {
            interval,
            start,
            window: TimeWindow::Lasting(minutes),
            days: one_day(),
        }
    }

    pub fn over_days(mut self, days: NonZeroU32) -> Self {
        self.days = days;
        self
    }

    pub fn is_multi_day(&self) -> bool {
        self.days.get() > 1
    }

    /// Start of the window in minutes from midnight of day 0.
    pub fn start_offset(&self) -> i64 {
        i64::from(self.start.minutes())
    }

    /// End of the window in minutes from midnight of day 0.
    ///
    /// May precede the start for a malformed single-day schedule.
    pub fn end_offset(&self) -> i64 {
        match self.window {
            TimeWindow::Until(end) => {
                i64::from(self.days.get() - 1) * i64::from(MINUTES_PER_DAY)
                    + i64::from(end.minutes())
            }
            TimeWindow::Lasting(minutes) => self.start_offset() + i64::from(minutes),
        }
    }

    /// Checks the schedule on its own. Imports run this even though they skip
    /// the other configuration rules.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.validate_into(&mut errors);
        errors.into_result()
    }

    fn validate_into(&self, errors: &mut ValidationErrors) {
        if self.start >= ClockTime::END_OF_DAY {
            errors.push("start", "Start time must be before 24:00");
        }
        if self.days.get() > SCHEDULE_MAX_DAYS {
            errors.push(
                "days",
                format!("A scenario can span at most {} days", SCHEDULE_MAX_DAYS),
            );
        }
        match self.window {
            TimeWindow::Until(end) => {
                if !self.is_multi_day() && self.start >= end {
                    errors.push("end", "End time must be after start time");
                }
            }
            TimeWindow::Lasting(0) => {
                errors.push("window", "Duration must be longer than 00:00");
            }
            TimeWindow::Lasting(minutes) if minutes > SCHEDULE_MAX_MINUTES => {
                errors.push(
                    "window",
                    format!("Duration must not exceed {} days", SCHEDULE_MAX_DAYS),
                );
            }
            TimeWindow::Lasting(_) => {}
        }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::single_day(
            Interval::default(),
            ClockTime::from_minutes(10 * 60).unwrap_or(ClockTime::MIDNIGHT),
            ClockTime::from_minutes(12 * 60 + 30).unwrap_or(ClockTime::END_OF_DAY),
        )
    }
}

// ============================================================================
// TimelineConfig
// ============================================================================

/// Cast, places and schedule of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimelineConfig {
    pub schedule: Schedule,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub places: Vec<Place>,
}

impl TimelineConfig {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            characters: Vec::new(),
            places: Vec::new(),
        }
    }

    pub fn with_characters(mut self, characters: Vec<Character>) -> Self {
        self.characters = characters;
        self.sort_entries();
        self
    }

    pub fn with_places(mut self, places: Vec<Place>) -> Self {
        self.places = places;
        self.sort_entries();
        self
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    /// Characters eligible to testify: the cast followed by the NPC.
    pub fn witnesses(&self) -> Vec<Character> {
        self.characters
            .iter()
            .cloned()
            .chain(std::iter::once(Character::npc()))
            .collect()
    }

    pub fn witness(&self, id: CharacterId) -> Option<Character> {
        if id.is_npc() {
            return Some(Character::npc());
        }
        self.character(id).cloned()
    }

    /// Restores display order after an edit. Stable, so equal keys keep insertion order.
    pub fn sort_entries(&mut self) {
        self.characters.sort_by_key(|c| c.sort);
        self.places.sort_by_key(|p| p.sort);
    }

    /// Checks every cross-field rule and reports all failures at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        self.schedule.validate_into(&mut errors);

        if self.characters.len() < CHARACTER_MIN_COUNT {
            errors.push("characters", "Add at least 1 character");
        } else if self.characters.len() > CHARACTER_MAX_COUNT {
            errors.push(
                "characters",
                format!("At most {} characters can be registered", CHARACTER_MAX_COUNT),
            );
        }
        let mut seen = HashSet::new();
        for character in &self.characters {
            if character.id.is_npc() {
                errors.push("characters", "The NPC witness id is reserved");
            } else if !seen.insert(character.id) {
                errors.push("characters", format!("Duplicate character id {}", character.id));
            }
        }

        if self.places.len() > PLACE_MAX_COUNT {
            errors.push(
                "places",
                format!("At most {} places can be registered", PLACE_MAX_COUNT),
            );
        }
        let mut seen = HashSet::new();
        for place in &self.places {
            if !seen.insert(place.id) {
                errors.push("places", format!("Duplicate place id {}", place.id));
            }
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{CharacterName, PlaceName};

    fn hm(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn interval(s: &str) -> Interval {
        s.parse().unwrap()
    }

    fn cast(n: usize) -> Vec<Character> {
        (0..n)
            .map(|i| {
                Character::new(CharacterName::new(format!("C{}", i)).unwrap())
                    .with_sort(i as u32 + 1)
            })
            .collect()
    }

    fn valid_config() -> TimelineConfig {
        TimelineConfig::new(Schedule::single_day(interval("01:00"), hm("18:00"), hm("23:00")))
            .with_characters(cast(3))
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(valid_config().validate(), Ok(()));
    }

    #[test]
    fn cast_size_is_bounded() {
        let empty = valid_config().with_characters(Vec::new());
        let errors = empty.validate().unwrap_err();
        assert_eq!(errors.for_field("characters"), Some("Add at least 1 character"));

        let crowded = valid_config().with_characters(cast(11));
        assert!(crowded.validate().unwrap_err().for_field("characters").is_some());

        let full = valid_config().with_characters(cast(10));
        assert!(full.validate().is_ok());
    }

    #[test]
    fn place_count_is_bounded() {
        let places = (0..11)
            .map(|i| Place::new(PlaceName::new(format!("P{}", i)).unwrap()))
            .collect();
        let errors = valid_config().with_places(places).validate().unwrap_err();
        assert!(errors.for_field("places").is_some());
    }

    #[test]
    fn inverted_single_day_window_is_rejected() {
        let mut config = valid_config();
        config.schedule = Schedule::single_day(interval("01:00"), hm("20:00"), hm("18:00"));
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.for_field("end"), Some("End time must be after start time"));
    }

    #[test]
    fn multi_day_window_may_end_earlier_in_the_day() {
        let mut config = valid_config();
        config.schedule = Schedule::single_day(interval("01:00"), hm("20:00"), hm("02:00"))
            .over_days(NonZeroU32::new(2).unwrap());
        assert!(config.validate().is_ok());
        assert_eq!(config.schedule.end_offset(), 1440 + 120);
    }

    #[test]
    fn duplicate_and_reserved_ids_are_reported() {
        let mut characters = cast(2);
        characters[1].id = characters[0].id;
        let errors = valid_config().with_characters(characters).validate().unwrap_err();
        assert!(errors.for_field("characters").unwrap().starts_with("Duplicate"));

        let mut characters = cast(1);
        characters[0].id = CharacterId::NPC;
        let errors = valid_config().with_characters(characters).validate().unwrap_err();
        assert_eq!(errors.for_field("characters"), Some("The NPC witness id is reserved"));
    }

    #[test]
    fn witnesses_append_the_npc() {
        let config = valid_config();
        let witnesses = config.witnesses();
        assert_eq!(witnesses.len(), 4);
        assert!(witnesses.last().unwrap().is_npc());
        assert!(config.witness(CharacterId::NPC).is_some());
        assert!(config.witness(CharacterId::new()).is_none());
    }

    #[test]
    fn characters_are_kept_in_sort_order() {
        let mut characters = cast(3);
        characters.reverse();
        let config = valid_config().with_characters(characters);
        let sorts: Vec<u32> = config.characters.iter().map(|c| c.sort).collect();
        assert_eq!(sorts, vec![1, 2, 3]);
    }

    #[test]
    fn day_count_and_duration_are_bounded() {
        let mut config = valid_config();
        config.schedule = Schedule::single_day(interval("01:00"), hm("20:00"), hm("02:00"))
            .over_days(NonZeroU32::new(SCHEDULE_MAX_DAYS).unwrap());
        assert!(config.validate().is_ok());

        config.schedule = config
            .schedule
            .over_days(NonZeroU32::new(200_000_000).unwrap());
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.for_field("days"), Some("A scenario can span at most 31 days"));

        let endless = Schedule::lasting(interval("00:30"), hm("22:00"), SCHEDULE_MAX_MINUTES + 1);
        assert!(endless.validate().unwrap_err().for_field("window").is_some());
        let longest = Schedule::lasting(interval("00:30"), hm("22:00"), SCHEDULE_MAX_MINUTES);
        assert!(longest.validate().is_ok());
    }

    #[test]
    fn lasting_window_end_offset() {
        let schedule = Schedule::lasting(interval("00:30"), hm("22:00"), 180);
        assert_eq!(schedule.end_offset(), 22 * 60 + 180);
    }

    #[test]
    fn schedule_serializes_as_hm_strings() {
        let schedule = Schedule::single_day(interval("00:30"), hm("10:00"), hm("12:30"));
        let json = serde_json::to_value(schedule).unwrap();
        assert_eq!(json["interval"], "00:30");
        assert_eq!(json["start"], "10:00");
        assert_eq!(json["window"]["until"], "12:30");
        assert_eq!(json["days"], 1);
    }
}
