//! Occupancy views derived from the event list and the time grid.
//!
//! - [`RowSpanMap`]: per actor column, how many grid rows each cell covers.
//! - [`AlibiMap`]: per time slot, the events overlapping it.
//!
//! Both are pure and rebuilt from scratch; an event whose times cannot be
//! placed on the grid is left out of the view instead of failing it.

use crate::entities::Character;
use crate::event::TimelineEvent;
use crate::ids::{CharacterId, EventId, PlaceId};
use crate::time_grid::TimeGrid;
use crate::value_objects::TimePoint;

// ============================================================================
// Row-span merge map
// ============================================================================

/// One grid cell of an actor column.
///
/// `span == 1` with no event is a plain cell, `span > 1` starts a merged
/// block, and `span == 0` is absorbed into the block above and must not be
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanCell {
    pub span: u32,
    pub event_id: Option<EventId>,
}

impl SpanCell {
    const EMPTY: SpanCell = SpanCell {
        span: 1,
        event_id: None,
    };

    pub fn is_absorbed(&self) -> bool {
        self.span == 0
    }

    pub fn is_free(&self) -> bool {
        *self == Self::EMPTY
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorColumn {
    pub character_id: CharacterId,
    pub cells: Vec<SpanCell>,
}

impl ActorColumn {
    /// Sum of all spans; equals the grid row count.
    pub fn total_span(&self) -> u32 {
        self.cells.iter().map(|c| c.span).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpanMap {
    rows: usize,
    columns: Vec<ActorColumn>,
}

impl RowSpanMap {
    /// Builds one column per actor, in the order given.
    ///
    /// Only events with both ends exactly on the grid are merged. Within a
    /// column the first event (in slice order) to claim a cell keeps it; a
    /// later event overlapping any claimed cell is not merged for that actor.
    pub fn build(actors: &[Character], events: &[TimelineEvent], grid: &TimeGrid) -> Self {
        let index = grid.row_index();
        let rows = index.len();

        let columns = actors
            .iter()
            .map(|actor| {
                let mut cells = vec![SpanCell::EMPTY; rows];
                for event in events.iter().filter(|e| e.involves(actor.id)) {
                    let Some(end) = event.end else { continue };
                    let (Some(&first), Some(&last)) = (index.get(&event.start), index.get(&end))
                    else {
                        continue;
                    };
                    if last < first || !cells[first..=last].iter().all(SpanCell::is_free) {
                        continue;
                    }
                    let span = u32::try_from(last - first + 1).unwrap_or(u32::MAX);
                    cells[first] = SpanCell {
                        span,
                        event_id: Some(event.id),
                    };
                    for cell in &mut cells[first + 1..=last] {
                        *cell = SpanCell {
                            span: 0,
                            event_id: Some(event.id),
                        };
                    }
                }
                ActorColumn {
                    character_id: actor.id,
                    cells,
                }
            })
            .collect();

        Self { rows, columns }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> &[ActorColumn] {
        &self.columns
    }

    pub fn column(&self, character_id: CharacterId) -> Option<&ActorColumn> {
        self.columns.iter().find(|c| c.character_id == character_id)
    }

    pub fn cell(&self, character_id: CharacterId, row: usize) -> Option<SpanCell> {
        self.column(character_id)
            .and_then(|column| column.cells.get(row).copied())
    }
}

// ============================================================================
// Alibi map
// ============================================================================

/// The half-open slot `[start, end)` and the events intersecting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlibiSlot<'a> {
    pub start: TimePoint,
    pub end: TimePoint,
    pub events: Vec<&'a TimelineEvent>,
}

impl<'a> AlibiSlot<'a> {
    pub fn contains(&self, point: TimePoint) -> bool {
        self.start <= point && point < self.end
    }

    pub fn at_place(&self, place_id: PlaceId) -> Vec<&'a TimelineEvent> {
        self.events
            .iter()
            .copied()
            .filter(|e| e.is_at(place_id))
            .collect()
    }

    /// Everyone taking part in an event during this slot, each listed once.
    pub fn characters(&self) -> Vec<&'a Character> {
        let mut seen = Vec::new();
        let mut characters = Vec::new();
        for character in self.events.iter().flat_map(|e| e.characters.iter()) {
            if !seen.contains(&character.id) {
                seen.push(character.id);
                characters.push(character);
            }
        }
        characters
    }

    pub fn whereabouts(&self, character_id: CharacterId) -> Vec<&'a TimelineEvent> {
        self.events
            .iter()
            .copied()
            .filter(|e| e.involves(character_id))
            .collect()
    }
}

/// Slot-by-slot view of who and what was active, borrowing from the event list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlibiMap<'a> {
    slots: Vec<AlibiSlot<'a>>,
}

impl<'a> AlibiMap<'a> {
    /// Events without an end time are not represented.
    pub fn build(events: &'a [TimelineEvent], grid: &TimeGrid) -> Self {
        let width = grid.slot_duration();
        let slots = grid
            .iter()
            .map(|start| {
                let end = start.plus(width);
                AlibiSlot {
                    start,
                    end,
                    events: events.iter().filter(|e| e.overlaps(start, end)).collect(),
                }
            })
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[AlibiSlot<'a>] {
        &self.slots
    }

    /// The slot covering `point`.
    pub fn at(&self, point: TimePoint) -> Option<&AlibiSlot<'a>> {
        self.slots.iter().find(|slot| slot.contains(point))
    }

    pub fn at_place(&self, point: TimePoint, place_id: PlaceId) -> Vec<&'a TimelineEvent> {
        self.at(point)
            .map(|slot| slot.at_place(place_id))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Schedule;
    use crate::entities::Place;
    use crate::time_grid::generate;
    use crate::value_objects::{CharacterName, Color, PlaceName};

    fn at(hm: &str) -> TimePoint {
        TimePoint::at(0, hm.parse().unwrap())
    }

    fn grid(start: &str, end: &str, interval: &str) -> TimeGrid {
        generate(&Schedule::single_day(
            interval.parse().unwrap(),
            start.parse().unwrap(),
            end.parse().unwrap(),
        ))
    }

    fn person(name: &str) -> Character {
        Character::new(CharacterName::new(name).unwrap())
    }

    fn event(start: &str, end: Option<&str>, who: &[&Character]) -> TimelineEvent {
        TimelineEvent {
            id: EventId::new(),
            start: at(start),
            end: end.map(at),
            color: Color::event_default(),
            detail: String::new(),
            place: None,
            characters: who.iter().map(|c| (*c).clone()).collect(),
            witness: None,
        }
    }

    #[test]
    fn aligned_event_merges_rows() {
        let alice = person("Alice");
        let grid = grid("10:00", "12:00", "00:30");
        let e = event("10:30", Some("11:30"), &[&alice]);

        let map = RowSpanMap::build(&[alice.clone()], &[e.clone()], &grid);
        let spans: Vec<u32> = map.column(alice.id).unwrap().cells.iter().map(|c| c.span).collect();

        assert_eq!(spans, vec![1, 3, 0, 0, 1]);
        assert_eq!(map.cell(alice.id, 1).unwrap().event_id, Some(e.id));
        assert!(map.cell(alice.id, 2).unwrap().is_absorbed());
    }

    #[test]
    fn misaligned_or_open_events_are_ignored() {
        let alice = person("Alice");
        let grid = grid("10:00", "12:00", "00:30");
        let events = [
            event("10:10", Some("11:00"), &[&alice]),
            event("10:00", None, &[&alice]),
            event("11:00", Some("13:00"), &[&alice]),
        ];

        let map = RowSpanMap::build(&[alice.clone()], &events, &grid);
        assert!(map.column(alice.id).unwrap().cells.iter().all(SpanCell::is_free));
    }

    #[test]
    fn only_involved_actors_are_merged() {
        let alice = person("Alice");
        let bob = person("Bob");
        let grid = grid("10:00", "11:00", "00:30");
        let e = event("10:00", Some("11:00"), &[&bob]);

        let map = RowSpanMap::build(&[alice.clone(), bob.clone()], &[e], &grid);
        assert_eq!(map.cell(alice.id, 0).unwrap().span, 1);
        assert_eq!(map.cell(bob.id, 0).unwrap().span, 3);
    }

    #[test]
    fn first_claim_wins_within_a_column() {
        let alice = person("Alice");
        let grid = grid("10:00", "12:00", "00:30");
        let first = event("10:00", Some("11:00"), &[&alice]);
        let second = event("10:30", Some("12:00"), &[&alice]);

        let map = RowSpanMap::build(&[alice.clone()], &[first.clone(), second], &grid);
        let column = map.column(alice.id).unwrap();
        assert_eq!(column.cells[0].event_id, Some(first.id));
        assert_eq!(column.cells[3], SpanCell::EMPTY);
    }

    #[test]
    fn spans_total_the_row_count() {
        let alice = person("Alice");
        let bob = person("Bob");
        let grid = grid("09:00", "18:00", "00:15");
        let events = [
            event("09:00", Some("10:00"), &[&alice, &bob]),
            event("09:30", Some("11:00"), &[&alice]),
            event("12:00", Some("12:00"), &[&bob]),
            event("13:15", Some("18:00"), &[&alice]),
            event("17:00", Some("16:00"), &[&bob]),
        ];

        let map = RowSpanMap::build(&[alice, bob], &events, &grid);
        for column in map.columns() {
            assert_eq!(column.total_span() as usize, map.rows());
        }
    }

    #[test]
    fn touching_intervals_are_not_alibis() {
        let grid = grid("10:00", "12:00", "01:00");
        let touching = event("10:00", Some("11:00"), &[]);
        let crossing = event("10:30", Some("11:30"), &[]);
        let events = [touching.clone(), crossing.clone()];

        let map = AlibiMap::build(&events, &grid);
        let slot = map.at(at("11:00")).unwrap();

        assert_eq!(slot.start, at("11:00"));
        assert_eq!(slot.end, at("12:00"));
        assert!(!slot.events.contains(&&touching));
        assert!(slot.events.contains(&&crossing));
    }

    #[test]
    fn open_ended_events_are_not_alibis() {
        let grid = grid("10:00", "12:00", "01:00");
        let events = [event("10:00", None, &[])];
        let map = AlibiMap::build(&events, &grid);
        assert!(map.slots().iter().all(|s| s.events.is_empty()));
    }

    #[test]
    fn who_was_where() {
        let alice = person("Alice");
        let bob = person("Bob");
        let study = Place::new(PlaceName::new("Study").unwrap());
        let grid = grid("20:00", "23:00", "00:30");

        let mut murder = event("21:00", Some("21:30"), &[&alice, &bob]);
        murder.place = Some(study.clone());
        let dinner = event("20:00", Some("22:00"), &[&bob]);
        let events = [murder.clone(), dinner];

        let map = AlibiMap::build(&events, &grid);

        let in_study = map.at_place(at("21:10"), study.id);
        assert_eq!(in_study.len(), 1);
        assert_eq!(in_study[0].id, murder.id);

        let slot = map.at(at("21:00")).unwrap();
        let names: Vec<&str> = slot.characters().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(slot.whereabouts(bob.id).len(), 2);

        assert!(map.at(at("23:45")).is_none());
        assert!(map.at_place(at("08:00"), study.id).is_empty());
    }
}
