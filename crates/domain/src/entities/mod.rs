//! Scenario entities - the cast, the places and the session metadata.

pub mod character;
pub mod place;
pub mod scenario;

pub use character::{Character, NPC_WITNESS_NAME};
pub use place::Place;
pub use scenario::{Scenario, DEFAULT_SCENARIO_NAME};

/// Anything listed in display order by a `sort` key.
pub trait Sorted {
    fn sort_key(&self) -> u32;
}

impl Sorted for Character {
    fn sort_key(&self) -> u32 {
        self.sort
    }
}

impl Sorted for Place {
    fn sort_key(&self) -> u32 {
        self.sort
    }
}

/// Sort key for an item appended after `items`: one past the largest key, or 1.
pub fn next_sort<T: Sorted>(items: &[T]) -> u32 {
    items
        .iter()
        .map(Sorted::sort_key)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}
