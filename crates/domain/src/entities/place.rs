//! Place entity - a location events happen at

use serde::{Deserialize, Serialize};

use crate::ids::PlaceId;
use crate::value_objects::{Color, PlaceMemo, PlaceName};

/// A location in the scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub name: PlaceName,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub memo: PlaceMemo,
    #[serde(default)]
    pub sort: u32,
}

impl Place {
    pub fn new(name: PlaceName) -> Self {
        Self {
            id: PlaceId::new(),
            name,
            color: Color::default(),
            memo: PlaceMemo::empty(),
            sort: 0,
        }
    }

    pub fn with_id(mut self, id: PlaceId) -> Self {
        self.id = id;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_memo(mut self, memo: PlaceMemo) -> Self {
        self.memo = memo;
        self
    }

    pub fn with_sort(mut self, sort: u32) -> Self {
        self.sort = sort;
        self
    }
}
